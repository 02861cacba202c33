//! Model-based property tests for both engines
//!
//! Each engine is driven through random op sequences mirrored against the
//! std map of the same shape; the tree additionally revalidates its
//! structural invariants after every operation.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::vec::Vec;

use crate::btree::BTree;
use crate::hash_table::HashTable;
use crate::traits::DictionaryIterator;

#[derive(Clone, Debug)]
enum Op {
    Add(u8, u32),
    Remove(u8),
    Update(u8, u32),
    Get(u8),
}

/// Keys drawn from a small domain so removals hit, chains collide, and tree
/// nodes are forced through borrow and merge paths.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..48, any::<u32>()).prop_map(|(k, v)| Op::Add(k, v)),
        (0u8..48).prop_map(Op::Remove),
        (0u8..48, any::<u32>()).prop_map(|(k, v)| Op::Update(k, v)),
        (0u8..48).prop_map(Op::Get),
    ]
}

proptest! {
    #[test]
    fn btree_matches_btreemap(
        order in 2usize..5,
        ops in prop::collection::vec(op_strategy(), 0..250),
    ) {
        let mut tree: BTree<u8, u32> = BTree::new(order);
        let mut model: BTreeMap<u8, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(k, v) => {
                    tree.add(k, v);
                    model.insert(k, v);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k).ok(), model.remove(&k));
                }
                Op::Update(k, v) => {
                    let known = model.contains_key(&k);
                    if known {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(tree.update(&k, v).is_ok(), known);
                }
                Op::Get(k) => {
                    prop_assert_eq!(tree.get(&k).ok(), model.get(&k));
                }
            }
            tree.validate();
            prop_assert_eq!(tree.count(), model.len());
        }

        // In-order traversal must mirror the model exactly, ascending.
        let mut cursor = tree.cursor();
        let mut visited = Vec::new();
        while cursor.move_next() {
            visited.push((
                *cursor.current_key().unwrap(),
                *cursor.current_value().unwrap(),
            ));
        }
        let expected: Vec<(u8, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(visited, expected);
    }

    #[test]
    fn hash_table_matches_hashmap(ops in prop::collection::vec(op_strategy(), 0..250)) {
        let mut table: HashTable<u8, u32> = HashTable::new();
        let mut model: HashMap<u8, u32> = HashMap::new();
        let mut capacity = table.capacity();

        for op in ops {
            match op {
                Op::Add(k, v) => {
                    table.add(k, v);
                    model.insert(k, v);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(table.remove(&k).ok(), model.remove(&k));
                }
                Op::Update(k, v) => {
                    let known = model.contains_key(&k);
                    if known {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(table.update(&k, v).is_ok(), known);
                }
                Op::Get(k) => {
                    prop_assert_eq!(table.get(&k).ok(), model.get(&k));
                }
            }

            // Capacity only ever doubles, and the 3/4 load bound holds after
            // every operation.
            let now = table.capacity();
            if now != capacity {
                prop_assert_eq!(now, capacity * 2);
                capacity = now;
            }
            prop_assert!(table.count() * 4 <= table.capacity() * 3);
            prop_assert_eq!(table.count(), model.len());
        }

        let mut cursor = table.cursor();
        let mut visited = BTreeMap::new();
        while cursor.move_next() {
            let key = *cursor.current_key().unwrap();
            let value = *cursor.current_value().unwrap();
            prop_assert!(visited.insert(key, value).is_none(), "key visited twice");
        }
        let expected: BTreeMap<u8, u32> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(visited, expected);
    }

    #[test]
    fn count_tracks_distinct_keys_under_duplicate_adds(
        keys in prop::collection::vec(0u8..8, 1..100),
    ) {
        let mut tree: BTree<u8, u32> = BTree::new(2);
        let mut table: HashTable<u8, u32> = HashTable::new();
        let mut distinct = BTreeSet::new();

        for (i, key) in keys.iter().enumerate() {
            tree.add(*key, i as u32);
            table.add(*key, i as u32);
            distinct.insert(*key);

            prop_assert_eq!(tree.count(), distinct.len());
            prop_assert_eq!(table.count(), distinct.len());
        }
        tree.validate();

        // The last add wins for every key.
        for key in &distinct {
            let last = keys.iter().rposition(|k| k == key).unwrap() as u32;
            prop_assert_eq!(tree.get(key), Ok(&last));
            prop_assert_eq!(table.get(key), Ok(&last));
        }
    }
}
