//! Balanced multiway search tree engine
//!
//! A B-tree parameterized by `order`: every node holds between `order - 1`
//! and `2 * order - 1` keys (the root is exempt from the minimum) and every
//! leaf sits at the same depth. Nodes are single-owner boxed values with no
//! parent links; insertion splits full nodes preemptively on the way down and
//! deletion is purely top-down (fill-then-descend), so no operation ever
//! needs to walk back up the tree.

use alloc::boxed::Box;
use core::mem;

use crate::error::{Result, SdictError};
use crate::seq::DynArray;
use crate::traits::{Dictionary, DictionaryIterator};

/// Default minimum branching factor, matching a small in-memory workload.
pub const DEFAULT_ORDER: usize = 3;

struct Node<K, V> {
    leaf: bool,
    keys: DynArray<K>,
    values: DynArray<V>,
    /// Child pointers; empty for leaves, `keys.len() + 1` entries otherwise.
    children: DynArray<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    fn new(leaf: bool) -> Self {
        Self {
            leaf,
            keys: DynArray::new(),
            values: DynArray::new(),
            children: DynArray::new(),
        }
    }

    fn is_full(&self, order: usize) -> bool {
        self.keys.len() == 2 * order - 1
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Index of the first key `>= key`; `keys.len()` when every key is smaller.
    fn lower_bound(&self, key: &K) -> usize {
        self.keys
            .iter()
            .position(|k| k >= key)
            .unwrap_or(self.keys.len())
    }

    fn find(&self, key: &K) -> Option<&V> {
        let mut node = self;
        loop {
            let idx = node.lower_bound(key);
            if idx < node.keys.len() && node.keys[idx] == *key {
                return Some(&node.values[idx]);
            }
            if node.leaf {
                return None;
            }
            node = &node.children[idx];
        }
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut node = self;
        loop {
            let idx = node.lower_bound(key);
            if idx < node.keys.len() && node.keys[idx] == *key {
                return Some(&mut node.values[idx]);
            }
            if node.leaf {
                return None;
            }
            node = &mut node.children[idx];
        }
    }
}

impl<K: Ord + Clone, V: Clone> Node<K, V> {
    /// Split the full child at `child_idx`, promoting its median entry here.
    ///
    /// Precondition: `self` is not full and `children[child_idx]` holds
    /// exactly `2 * order - 1` keys.
    fn split_child(&mut self, child_idx: usize, order: usize) {
        let left = &mut self.children[child_idx];
        let mut right = Node::new(left.leaf);
        right.keys = left.keys.split_off(order);
        right.values = left.values.split_off(order);
        if !left.leaf {
            right.children = left.children.split_off(order);
        }
        let median_key = left.keys.remove(order - 1);
        let median_value = left.values.remove(order - 1);

        self.keys.insert(child_idx, median_key);
        self.values.insert(child_idx, median_value);
        self.children.insert(child_idx + 1, Box::new(right));
    }

    /// Insert into the subtree rooted here.
    ///
    /// Precondition: `self` is not full, and `key` is not present anywhere in
    /// the subtree (duplicates are routed to update by the caller).
    fn insert_non_full(&mut self, key: K, value: V, order: usize) {
        let mut idx = self.lower_bound(&key);
        if self.leaf {
            self.keys.insert(idx, key);
            self.values.insert(idx, value);
            return;
        }
        if self.children[idx].is_full(order) {
            self.split_child(idx, order);
            if key > self.keys[idx] {
                idx += 1;
            }
        }
        self.children[idx].insert_non_full(key, value, order);
    }

    /// Entry with the greatest key in this subtree (in-order predecessor
    /// source when called on a left child).
    fn max_entry(&self) -> (K, V) {
        let mut node = self;
        while !node.leaf {
            node = &node.children[node.children.len() - 1];
        }
        let last = node.keys.len() - 1;
        (node.keys[last].clone(), node.values[last].clone())
    }

    /// Entry with the smallest key in this subtree (in-order successor
    /// source when called on a right child).
    fn min_entry(&self) -> (K, V) {
        let mut node = self;
        while !node.leaf {
            node = &node.children[0];
        }
        (node.keys[0].clone(), node.values[0].clone())
    }

    /// Remove `key` from the subtree rooted here, returning its value.
    ///
    /// Precondition: every node this descends into holds at least `order`
    /// keys (guaranteed by `fill`), so removal can never leave a node below
    /// its minimum.
    fn remove_key(&mut self, key: &K, order: usize) -> Result<V> {
        let idx = self.lower_bound(key);
        if idx < self.keys.len() && self.keys[idx] == *key {
            if self.leaf {
                self.keys.remove(idx);
                return Ok(self.values.remove(idx));
            }
            return self.remove_internal(idx, order);
        }
        if self.leaf {
            return Err(SdictError::KeyNotFound);
        }
        if self.children[idx].keys.len() < order {
            self.fill(idx, order);
            // A merge may have shifted the target's child one slot left;
            // re-scan rather than patching the index.
            let idx = self.lower_bound(key);
            return self.children[idx].remove_key(key, order);
        }
        self.children[idx].remove_key(key, order)
    }

    /// Remove the separator entry at `idx` of an internal node.
    fn remove_internal(&mut self, idx: usize, order: usize) -> Result<V> {
        if self.children[idx].keys.len() >= order {
            // Replace with the in-order predecessor entry, then delete the
            // now-duplicated predecessor key from the left subtree.
            let (pred_key, pred_value) = self.children[idx].max_entry();
            self.keys[idx] = pred_key.clone();
            let removed = mem::replace(&mut self.values[idx], pred_value);
            self.children[idx].remove_key(&pred_key, order)?;
            Ok(removed)
        } else if self.children[idx + 1].keys.len() >= order {
            let (succ_key, succ_value) = self.children[idx + 1].min_entry();
            self.keys[idx] = succ_key.clone();
            let removed = mem::replace(&mut self.values[idx], succ_value);
            self.children[idx + 1].remove_key(&succ_key, order)?;
            Ok(removed)
        } else {
            // Neither neighbor can spare a key: pull the separator down into
            // the merged child and delete it from there.
            let key = self.keys[idx].clone();
            self.merge_children(idx);
            self.children[idx].remove_key(&key, order)
        }
    }

    /// Guarantee that `children[child_idx]` holds at least `order` keys
    /// before descending into it: borrow from the left sibling, else the
    /// right sibling, else merge with a sibling.
    fn fill(&mut self, child_idx: usize, order: usize) {
        if child_idx > 0 && self.children[child_idx - 1].keys.len() >= order {
            self.borrow_from_prev(child_idx);
        } else if child_idx + 1 < self.children.len()
            && self.children[child_idx + 1].keys.len() >= order
        {
            self.borrow_from_next(child_idx);
        } else if child_idx + 1 < self.children.len() {
            self.merge_children(child_idx);
        } else {
            // Last child: merge it into its left sibling.
            self.merge_children(child_idx - 1);
        }
    }

    /// Rotate one entry from the left sibling through the separator.
    fn borrow_from_prev(&mut self, child_idx: usize) {
        let sibling = &mut self.children[child_idx - 1];
        let last = sibling.keys.len() - 1;
        let sib_key = sibling.keys.remove(last);
        let sib_value = sibling.values.remove(last);
        let sib_child = if sibling.leaf {
            None
        } else {
            let last_child = sibling.children.len() - 1;
            Some(sibling.children.remove(last_child))
        };

        let sep_key = mem::replace(&mut self.keys[child_idx - 1], sib_key);
        let sep_value = mem::replace(&mut self.values[child_idx - 1], sib_value);

        let child = &mut self.children[child_idx];
        child.keys.insert(0, sep_key);
        child.values.insert(0, sep_value);
        if let Some(grandchild) = sib_child {
            child.children.insert(0, grandchild);
        }
    }

    /// Rotate one entry from the right sibling through the separator.
    fn borrow_from_next(&mut self, child_idx: usize) {
        let sibling = &mut self.children[child_idx + 1];
        let sib_key = sibling.keys.remove(0);
        let sib_value = sibling.values.remove(0);
        let sib_child = if sibling.leaf {
            None
        } else {
            Some(sibling.children.remove(0))
        };

        let sep_key = mem::replace(&mut self.keys[child_idx], sib_key);
        let sep_value = mem::replace(&mut self.values[child_idx], sib_value);

        let child = &mut self.children[child_idx];
        child.keys.push(sep_key);
        child.values.push(sep_value);
        if let Some(grandchild) = sib_child {
            child.children.push(grandchild);
        }
    }

    /// Fold `children[idx + 1]` and the separator at `idx` into
    /// `children[idx]`.
    fn merge_children(&mut self, idx: usize) {
        let sep_key = self.keys.remove(idx);
        let sep_value = self.values.remove(idx);
        let mut right = self.children.remove(idx + 1);

        let left = &mut self.children[idx];
        left.keys.push(sep_key);
        left.values.push(sep_value);
        left.keys.append(&mut right.keys);
        left.values.append(&mut right.values);
        left.children.append(&mut right.children);
    }
}

/// Balanced multiway search tree keyed by the key type's natural order
///
/// Insert, search, and delete run in O(log n); iteration yields keys in
/// strictly ascending order.
pub struct BTree<K, V> {
    root: Box<Node<K, V>>,
    order: usize,
    count: usize,
}

impl<K: Ord + Clone, V: Clone> BTree<K, V> {
    /// Create an empty tree with minimum branching factor `order`
    ///
    /// Panics if `order < 2`.
    pub fn new(order: usize) -> Self {
        assert!(order >= 2, "tree order must be at least 2");
        Self {
            root: Box::new(Node::new(true)),
            order,
            count: 0,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Structural capacity; the tree keeps no pre-allocated slack, so this
    /// equals the entry count.
    pub fn capacity(&self) -> usize {
        self.count
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.root.find(key).ok_or(SdictError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.root.find(key).is_some()
    }

    /// Insert or overwrite (upsert); duplicate keys never change the count
    pub fn add(&mut self, key: K, value: V) {
        if let Some(slot) = self.root.find_mut(&key) {
            *slot = value;
            return;
        }
        if self.root.is_full(self.order) {
            // Grow upward: the old root becomes the only child of a fresh
            // root, then splits. This is the only place tree height grows.
            let old_root = mem::replace(&mut self.root, Box::new(Node::new(false)));
            self.root.children.push(old_root);
            self.root.split_child(0, self.order);
        }
        self.root.insert_non_full(key, value, self.order);
        self.count += 1;
    }

    pub fn update(&mut self, key: &K, value: V) -> Result<()> {
        match self.root.find_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SdictError::KeyNotFound),
        }
    }

    /// Remove `key`, returning its value
    ///
    /// A failed remove reports `KeyNotFound` before any structural mutation,
    /// leaving the tree unchanged.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        if !self.contains_key(key) {
            return Err(SdictError::KeyNotFound);
        }
        let removed = self.root.remove_key(key, self.order)?;
        self.count -= 1;

        if self.root.keys.is_empty() {
            if self.root.leaf {
                self.root = Box::new(Node::new(true));
            } else {
                // The only place tree height shrinks: an empty internal root
                // is replaced by its sole child.
                let child = self.root.children.remove(0);
                self.root = child;
            }
        }
        Ok(removed)
    }

    /// Fresh in-order cursor positioned before the smallest key
    pub fn cursor(&self) -> BTreeCursor<'_, K, V> {
        BTreeCursor::new(self)
    }

    /// Panic if any structural invariant is violated (test support).
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        fn walk<K: Ord, V>(
            node: &Node<K, V>,
            depth: usize,
            is_root: bool,
            order: usize,
            lower: Option<&K>,
            upper: Option<&K>,
            leaf_depth: &mut Option<usize>,
            total: &mut usize,
        ) {
            assert_eq!(node.keys.len(), node.values.len());
            assert!(node.keys.len() <= 2 * order - 1, "node overfull");
            if !is_root {
                assert!(node.keys.len() >= order - 1, "non-root node underfull");
            }
            for i in 0..node.keys.len() {
                if i > 0 {
                    assert!(node.keys[i - 1] < node.keys[i], "keys not strictly ascending");
                }
                if let Some(lo) = lower {
                    assert!(lo < &node.keys[i], "key below subtree range");
                }
                if let Some(hi) = upper {
                    assert!(&node.keys[i] < hi, "key above subtree range");
                }
            }
            *total += node.keys.len();
            if node.leaf {
                assert!(node.children.is_empty());
                match leaf_depth {
                    Some(expected) => assert_eq!(*expected, depth, "leaves at unequal depth"),
                    None => *leaf_depth = Some(depth),
                }
            } else {
                assert!(!node.keys.is_empty(), "internal node without keys");
                assert_eq!(node.children.len(), node.keys.len() + 1);
                for i in 0..node.children.len() {
                    let lo = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
                    let hi = if i == node.keys.len() {
                        upper
                    } else {
                        Some(&node.keys[i])
                    };
                    walk(
                        &node.children[i],
                        depth + 1,
                        false,
                        order,
                        lo,
                        hi,
                        leaf_depth,
                        total,
                    );
                }
            }
        }

        let mut leaf_depth = None;
        let mut total = 0;
        walk(
            &self.root,
            0,
            true,
            self.order,
            None,
            None,
            &mut leaf_depth,
            &mut total,
        );
        assert_eq!(total, self.count, "count out of sync with stored keys");
    }
}

impl<K: Ord + Clone, V: Clone> Default for BTree<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

impl<K: Ord + Clone, V: Clone> Dictionary<K, V> for BTree<K, V> {
    fn count(&self) -> usize {
        BTree::count(self)
    }

    fn capacity(&self) -> usize {
        BTree::capacity(self)
    }

    fn get(&self, key: &K) -> Result<&V> {
        BTree::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTree::contains_key(self, key)
    }

    fn add(&mut self, key: K, value: V) {
        BTree::add(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        BTree::remove(self, key)
    }

    fn update(&mut self, key: &K, value: V) -> Result<()> {
        BTree::update(self, key, value)
    }

    fn iter(&self) -> Box<dyn DictionaryIterator<K, V> + '_> {
        Box::new(self.cursor())
    }
}

struct Frame<'a, K, V> {
    node: &'a Node<K, V>,
    /// Next key index to yield within `node`.
    index: usize,
}

impl<K, V> Clone for Frame<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Frame<'_, K, V> {}

/// In-order cursor backed by an explicit stack of `(node, index)` frames
///
/// Seeding pushes the leftmost descent path; each advance yields the frame's
/// next key and, for internal nodes, pushes the leftmost path of the child to
/// the right of that key.
pub struct BTreeCursor<'a, K, V> {
    root: &'a Node<K, V>,
    stack: DynArray<Frame<'a, K, V>>,
    current: Option<(&'a K, &'a V)>,
}

impl<'a, K, V> BTreeCursor<'a, K, V> {
    fn new(tree: &'a BTree<K, V>) -> Self {
        let root: &'a Node<K, V> = &tree.root;
        let mut cursor = Self {
            root,
            stack: DynArray::new(),
            current: None,
        };
        cursor.push_leftmost(root);
        cursor
    }

    fn push_leftmost(&mut self, mut node: &'a Node<K, V>) {
        while !node.keys.is_empty() {
            self.stack.push(Frame { node, index: 0 });
            if node.leaf {
                break;
            }
            node = &node.children[0];
        }
    }
}

impl<'a, K, V> DictionaryIterator<K, V> for BTreeCursor<'a, K, V> {
    fn move_next(&mut self) -> bool {
        loop {
            let len = self.stack.len();
            if len == 0 {
                self.current = None;
                return false;
            }
            let frame = self.stack[len - 1];
            if frame.index < frame.node.keys.len() {
                self.stack[len - 1].index += 1;
                self.current = Some((
                    &frame.node.keys[frame.index],
                    &frame.node.values[frame.index],
                ));
                if !frame.node.leaf {
                    self.push_leftmost(&frame.node.children[frame.index + 1]);
                }
                return true;
            }
            self.stack.pop();
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.current = None;
        let root = self.root;
        self.push_leftmost(root);
    }

    fn current_key(&self) -> Result<&K> {
        self.current
            .map(|(key, _)| key)
            .ok_or(SdictError::IteratorExhausted)
    }

    fn current_value(&self) -> Result<&V> {
        self.current
            .map(|(_, value)| value)
            .ok_or(SdictError::IteratorExhausted)
    }
}
