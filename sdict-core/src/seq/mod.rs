//! Internal sequence containers
//!
//! [`DynArray`] backs the hash-table bucket array and the tree cursor's
//! traversal stack; [`SinglyLinkedList`] holds per-bucket collision chains.
//! Both are public because the sparse adapters reuse them for snapshot
//! buffers and entry collectors.

pub mod dyn_array;
pub mod linked_list;

pub use dyn_array::DynArray;
pub use linked_list::SinglyLinkedList;
