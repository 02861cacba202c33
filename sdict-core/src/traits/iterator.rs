//! Stateful cursor contract shared by both engines

use crate::error::Result;

/// Restartable cursor over a dictionary's entries
///
/// A cursor starts positioned before the first entry; `move_next` advances it
/// and reports whether an entry is available. The tree cursor yields keys in
/// strictly ascending order; the hash cursor follows bucket placement and
/// defines no ordering relative to key values. Cursors borrow the underlying
/// structure for their lifetime, so structural mutation during a traversal is
/// rejected at compile time.
pub trait DictionaryIterator<K, V> {
    /// Advance to the next entry; `false` once the sequence is exhausted
    fn move_next(&mut self) -> bool;

    /// Return to the position before the first entry
    fn reset(&mut self);

    /// Key at the current position
    ///
    /// Fails with [`SdictError::IteratorExhausted`](crate::SdictError::IteratorExhausted)
    /// before the first `move_next` or after exhaustion.
    fn current_key(&self) -> Result<&K>;

    /// Value at the current position
    ///
    /// Same failure contract as [`current_key`](DictionaryIterator::current_key).
    fn current_value(&self) -> Result<&V>;
}
