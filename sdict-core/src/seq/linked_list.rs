//! Singly linked sequence used for hash-bucket collision chains

use alloc::boxed::Box;

use crate::error::{Result, SdictError};

struct ListNode<T> {
    item: T,
    next: Option<Box<ListNode<T>>>,
}

/// Singly linked list
///
/// Positional access is linear; chains are expected to stay short (a few
/// entries per bucket at the hash table's load factor).
#[derive(Default)]
pub struct SinglyLinkedList<T> {
    head: Option<Box<ListNode<T>>>,
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_front(&mut self, item: T) {
        self.head = Some(Box::new(ListNode {
            item,
            next: self.head.take(),
        }));
        self.len += 1;
    }

    pub fn push_back(&mut self, item: T) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(ListNode { item, next: None }));
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            self.head = node.next;
            self.len -= 1;
            node.item
        })
    }

    pub fn first(&self) -> Result<&T> {
        self.head
            .as_deref()
            .map(|node| &node.item)
            .ok_or(SdictError::IndexOutOfRange)
    }

    pub fn last(&self) -> Result<&T> {
        let mut link = self.head.as_deref().ok_or(SdictError::IndexOutOfRange)?;
        while let Some(next) = link.next.as_deref() {
            link = next;
        }
        Ok(&link.item)
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(SdictError::IndexOutOfRange);
        }
        let mut link = self.head.as_deref();
        for _ in 0..index {
            link = link.and_then(|node| node.next.as_deref());
        }
        link.map(|node| &node.item).ok_or(SdictError::IndexOutOfRange)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(SdictError::IndexOutOfRange);
        }
        let mut link = self.head.as_deref_mut();
        for _ in 0..index {
            link = link.and_then(|node| node.next.as_deref_mut());
        }
        link.map(|node| &mut node.item)
            .ok_or(SdictError::IndexOutOfRange)
    }

    /// Insert `item` so that it occupies position `index`
    ///
    /// Fails with `IndexOutOfRange` when `index > len`.
    pub fn insert_at(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len {
            return Err(SdictError::IndexOutOfRange);
        }
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => return Err(SdictError::IndexOutOfRange),
            }
        }
        *link = Some(Box::new(ListNode {
            item,
            next: link.take(),
        }));
        self.len += 1;
        Ok(())
    }

    /// Unlink and return the element at position `index`
    ///
    /// Fails with `IndexOutOfRange` when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(SdictError::IndexOutOfRange);
        }
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => return Err(SdictError::IndexOutOfRange),
            }
        }
        match link.take() {
            Some(node) => {
                *link = node.next;
                self.len -= 1;
                Ok(node.item)
            }
            None => Err(SdictError::IndexOutOfRange),
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }
}

// Unlink iteratively so a long chain cannot overflow the stack through
// recursive Box drops.
impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// Borrowing iterator over chain elements in position order
pub struct Iter<'a, T> {
    next: Option<&'a ListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.item
        })
    }
}

/// Mutably borrowing iterator over chain elements in position order
pub struct IterMut<'a, T> {
    next: Option<&'a mut ListNode<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.item
        })
    }
}
