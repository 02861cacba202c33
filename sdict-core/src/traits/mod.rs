//! Abstract interfaces for the dictionary engines
//!
//! Traits here are pure interfaces - no concrete implementations.

pub mod dictionary;
pub mod iterator;

pub use dictionary::Dictionary;
pub use iterator::DictionaryIterator;
