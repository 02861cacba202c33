//! Error types for dictionary and sequence operations

/// Errors that can occur during dictionary and sequence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdictError {
    /// Lookup, update, or removal of a key that is not present
    KeyNotFound,
    /// Cursor read before the first advance or after exhaustion
    IteratorExhausted,
    /// Index outside `[0, len)`
    IndexOutOfRange,
    /// Subsequence bounds inverted or out of bounds
    InvalidRange,
}

impl core::fmt::Display for SdictError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            SdictError::KeyNotFound => "Key not found",
            SdictError::IteratorExhausted => "Iterator exhausted",
            SdictError::IndexOutOfRange => "Index out of range",
            SdictError::InvalidRange => "Invalid range bounds",
        };
        write!(f, "{msg}")
    }
}

/// Result type for dictionary and sequence operations
pub type Result<T> = core::result::Result<T, SdictError>;
