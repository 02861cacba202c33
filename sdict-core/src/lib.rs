#![no_std]

//! sdict-core - Dictionary Contract and Storage Engines
//!
//! This crate provides the polymorphic dictionary contract together with its
//! two interchangeable engines: a balanced multiway search tree and a chained
//! hash table. The sparse containers in the `sdict` crate consume everything
//! here exclusively through the [`Dictionary`] trait.
//!
//! Single-threaded by design: every instance exclusively owns its nodes or
//! buckets, nothing is shared, and callers needing concurrent access must
//! serialize externally.

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod btree;
pub mod error;
pub mod hash_table;
pub mod key;
pub mod seq;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use btree::{BTree, BTreeCursor, DEFAULT_ORDER};
pub use error::{Result, SdictError};
pub use hash_table::{HashTable, HashTableCursor, DEFAULT_CAPACITY};
pub use key::{IndexPair, KeyValue};
pub use seq::{DynArray, SinglyLinkedList};
pub use traits::{Dictionary, DictionaryIterator};
