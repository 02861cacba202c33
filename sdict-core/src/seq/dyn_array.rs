//! Contiguous growable storage with amortized-doubling growth

use alloc::vec::Vec;

use crate::error::{Result, SdictError};

/// Resizable sequence container
///
/// Capacity grows by doubling (0, 1, 2, 4, ...), so `push` is amortized O(1).
/// Positional `insert`/`remove` follow `Vec` semantics and panic when an
/// index violates the caller's invariants; the checked accessors (`get`,
/// `first`, `last`, `subsequence`) surface errors instead and form the
/// container's external contract.
#[derive(Debug, Clone, Default)]
pub struct DynArray<T> {
    items: Vec<T>,
}

impl<T> DynArray<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Append `item`, doubling capacity when full
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.grow();
        }
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Insert `item` at `index`, shifting later elements right
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        if self.items.len() == self.items.capacity() {
            self.grow();
        }
        self.items.insert(index, item);
    }

    /// Remove and return the element at `index`, shifting later elements left
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(SdictError::IndexOutOfRange)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.items.get_mut(index).ok_or(SdictError::IndexOutOfRange)
    }

    pub fn first(&self) -> Result<&T> {
        self.items.first().ok_or(SdictError::IndexOutOfRange)
    }

    pub fn last(&self) -> Result<&T> {
        self.items.last().ok_or(SdictError::IndexOutOfRange)
    }

    /// Move all elements of `other` to the end of `self`
    pub fn append(&mut self, other: &mut DynArray<T>) {
        self.items.append(&mut other.items);
    }

    /// Split off and return the tail starting at `at`
    ///
    /// Panics if `at > len`.
    pub fn split_off(&mut self, at: usize) -> DynArray<T> {
        Self {
            items: self.items.split_off(at),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone> DynArray<T> {
    /// Copy of the half-open range `[start, end)`
    ///
    /// Fails with `InvalidRange` when the bounds are inverted or reach past
    /// the end of the sequence.
    pub fn subsequence(&self, start: usize, end: usize) -> Result<DynArray<T>> {
        if start > end || end > self.items.len() {
            return Err(SdictError::InvalidRange);
        }
        Ok(Self {
            items: self.items[start..end].to_vec(),
        })
    }

    /// New sequence holding the elements of `self` followed by `other`'s
    pub fn concat(&self, other: &DynArray<T>) -> DynArray<T> {
        let mut items = Vec::with_capacity(self.items.len() + other.items.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Self { items }
    }
}

impl<T> DynArray<T> {
    fn grow(&mut self) {
        let target = if self.items.capacity() == 0 {
            1
        } else {
            self.items.capacity() * 2
        };
        self.items.reserve_exact(target - self.items.len());
    }
}

impl<T> core::ops::Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> core::ops::IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
