//! SDICT - Pluggable Dictionaries with Sparse Container Adapters
//!
//! This library provides sparse vector and matrix containers built on top of
//! interchangeable dictionary engines from sdict-core.
//!
//! ## Architecture
//!
//! SDICT follows a clean core/adapter separation:
//!
//! - **sdict-core**: Dictionary contract, engines, and sequences (no_std)
//! - **sdict**: Sparse containers that consume any engine through the contract
//!
//! ## Quick Start
//!
//! ```rust
//! use sdict::{BTree, HashTable, SparseVector};
//!
//! fn example() -> sdict::Result<()> {
//!     // Any dictionary engine works behind the same contract
//!     let mut vector = SparseVector::new(10, Box::new(BTree::<usize, f64>::default()));
//!     vector.set_element(2, 3.5)?;
//!     vector.map(|x| x * 2.0)?;
//!     assert_eq!(vector.get_element(2)?, 7.0);
//!
//!     // Absent indices read as the default value
//!     assert_eq!(vector.get_element(5)?, 0.0);
//!
//!     // Swapping the engine changes nothing about the container
//!     let mut hashed = SparseVector::new(10, Box::new(HashTable::<usize, f64>::new()));
//!     hashed.set_element(2, 3.5)?;
//!     assert_eq!(hashed.get_element(2)?, 3.5);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Interchangeable engines**: Balanced multiway tree or chained hash table
//! - **Sparse storage**: Only non-default elements occupy memory
//! - **Ordered traversal**: Row-major iteration with the tree engine
//! - **Composite keys**: `IndexPair` with decorrelated row/column hashing

// Re-export the dictionary contract and engines
pub use sdict_core::{
    // Engines
    BTree, BTreeCursor, HashTable, HashTableCursor,
    // Contract traits
    Dictionary, DictionaryIterator,
    // Keys and entries
    IndexPair, KeyValue,
    // Sequences
    DynArray, SinglyLinkedList,
    // Error handling
    Result, SdictError,
    // Tuning constants
    DEFAULT_CAPACITY, DEFAULT_ORDER,
};

// Adapter modules
pub mod sparse_matrix;
pub mod sparse_vector;

pub use sparse_matrix::SparseMatrix;
pub use sparse_vector::SparseVector;
