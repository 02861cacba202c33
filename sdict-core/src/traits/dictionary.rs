//! The polymorphic dictionary contract
//!
//! Both engines implement this capability set, and the sparse containers
//! consume it exclusively through `dyn Dictionary` - never through a concrete
//! engine type. This is the one seam where virtual dispatch is required: the
//! whole point is engine interchangeability behind one contract.

use alloc::boxed::Box;

use super::iterator::DictionaryIterator;
use crate::error::Result;

/// Uniform associative-storage capability set
///
/// Implementations must keep `count` equal to the number of distinct keys at
/// all times, including under arbitrary duplicate-add sequences.
pub trait Dictionary<K, V> {
    /// Number of entries currently stored
    fn count(&self) -> usize;

    /// Structural capacity of the engine
    ///
    /// For the hash table this is the bucket count; the tree pre-allocates
    /// nothing beyond in-progress nodes, so its capacity equals its count.
    fn capacity(&self) -> usize;

    /// Look up the value stored under `key`
    ///
    /// Fails with [`SdictError::KeyNotFound`](crate::SdictError::KeyNotFound)
    /// if the key is absent.
    fn get(&self, key: &K) -> Result<&V>;

    /// Whether `key` is present; total, never fails
    fn contains_key(&self, key: &K) -> bool;

    /// Insert `key` with `value`, overwriting the value if the key exists
    ///
    /// Duplicate adds behave as [`update`](Dictionary::update) (upsert) and
    /// leave the count unchanged. Callers relying on add-rejects-duplicate
    /// semantics must check [`contains_key`](Dictionary::contains_key) first.
    fn add(&mut self, key: K, value: V);

    /// Remove the entry under `key`, returning its value
    ///
    /// Fails with `KeyNotFound` if the key is absent; a failed remove leaves
    /// the structure untouched.
    fn remove(&mut self, key: &K) -> Result<V>;

    /// Replace the value under an existing `key`
    ///
    /// Fails with `KeyNotFound` if the key is absent; never inserts.
    fn update(&mut self, key: &K, value: V) -> Result<()>;

    /// Fresh cursor positioned before the first entry
    fn iter(&self) -> Box<dyn DictionaryIterator<K, V> + '_>;
}
