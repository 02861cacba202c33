//! Chained hash table engine
//!
//! Buckets are independent singly linked chains; a key lives in exactly one
//! chain, at most once. Capacity doubles whenever an insertion pushes the
//! load factor above 3/4, redistributing every existing pair with the same
//! hasher state. Hashing is delegated to a [`BuildHasher`]; everything else
//! (chaining, growth, iteration) is implemented here.

use alloc::boxed::Box;
use core::hash::{BuildHasher, Hash};

use hashbrown::hash_map::DefaultHashBuilder;

use crate::error::{Result, SdictError};
use crate::key::KeyValue;
use crate::seq::{linked_list, DynArray, SinglyLinkedList};
use crate::traits::{Dictionary, DictionaryIterator};

/// Bucket count of a freshly constructed table.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load-factor threshold numerator (threshold = 3/4).
const MAX_LOAD_NUMERATOR: usize = 3;
/// Load-factor threshold denominator.
const MAX_LOAD_DENOMINATOR: usize = 4;

type Chain<K, V> = SinglyLinkedList<KeyValue<K, V>>;

/// Chained hash table with automatic capacity doubling
///
/// Insert, search, and delete are amortized O(1); a rehash touches every
/// stored pair and is invisible to callers. The hasher state is pluggable
/// the way `std::collections::HashMap` allows, defaulting to hashbrown's
/// builder; tests inject deterministic hashers through `S` to pin bucket
/// placement.
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    buckets: DynArray<Chain<K, V>>,
    count: usize,
    hash_builder: S,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Table with the default initial capacity of 16 buckets
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Table with `capacity` initial buckets
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    /// Table with `capacity` initial buckets and an explicit hasher state
    ///
    /// Panics if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        assert!(capacity > 0, "hash table capacity must be non-zero");
        Self {
            buckets: Self::empty_buckets(capacity),
            count: 0,
            hash_builder,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Current bucket count
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        let chain = &self.buckets[self.bucket_index(key, self.buckets.len())];
        chain
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
            .ok_or(SdictError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Insert or overwrite (upsert); duplicate keys never change the count
    pub fn add(&mut self, key: K, value: V) {
        let idx = self.bucket_index(&key, self.buckets.len());
        let chain = &mut self.buckets[idx];
        for entry in chain.iter_mut() {
            if entry.key == key {
                entry.value = value;
                return;
            }
        }
        chain.push_back(KeyValue::new(key, value));
        self.count += 1;

        if self.count * MAX_LOAD_DENOMINATOR > self.buckets.len() * MAX_LOAD_NUMERATOR {
            self.rehash();
        }
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.bucket_index(key, self.buckets.len());
        let chain = &mut self.buckets[idx];
        let position = chain
            .iter()
            .position(|entry| entry.key == *key)
            .ok_or(SdictError::KeyNotFound)?;
        let entry = chain.remove_at(position)?;
        self.count -= 1;
        Ok(entry.value)
    }

    pub fn update(&mut self, key: &K, value: V) -> Result<()> {
        let idx = self.bucket_index(key, self.buckets.len());
        for entry in self.buckets[idx].iter_mut() {
            if entry.key == *key {
                entry.value = value;
                return Ok(());
            }
        }
        Err(SdictError::KeyNotFound)
    }

    /// Fresh cursor walking buckets ascending, then chain position ascending
    pub fn cursor(&self) -> HashTableCursor<'_, K, V> {
        HashTableCursor::new(&self.buckets)
    }

    fn bucket_index(&self, key: &K, capacity: usize) -> usize {
        (self.hash_builder.hash_one(key) % capacity as u64) as usize
    }

    /// Double the bucket array and redistribute every pair.
    ///
    /// The replacement is a single assignment at the end, so no intermediate
    /// state is observable through `&self` methods.
    fn rehash(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let mut new_buckets = Self::empty_buckets(new_capacity);

        for bucket in 0..self.buckets.len() {
            while let Some(entry) = self.buckets[bucket].pop_front() {
                let idx = self.bucket_index(&entry.key, new_capacity);
                new_buckets[idx].push_back(entry);
            }
        }
        self.buckets = new_buckets;
    }

    fn empty_buckets(capacity: usize) -> DynArray<Chain<K, V>> {
        let mut buckets = DynArray::with_capacity(capacity);
        for _ in 0..capacity {
            buckets.push(SinglyLinkedList::new());
        }
        buckets
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Dictionary<K, V> for HashTable<K, V, S> {
    fn count(&self) -> usize {
        HashTable::count(self)
    }

    fn capacity(&self) -> usize {
        HashTable::capacity(self)
    }

    fn get(&self, key: &K) -> Result<&V> {
        HashTable::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashTable::contains_key(self, key)
    }

    fn add(&mut self, key: K, value: V) {
        HashTable::add(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        HashTable::remove(self, key)
    }

    fn update(&mut self, key: &K, value: V) -> Result<()> {
        HashTable::update(self, key, value)
    }

    fn iter(&self) -> Box<dyn DictionaryIterator<K, V> + '_> {
        Box::new(self.cursor())
    }
}

/// Cursor over a hash table's entries in bucket-placement order
///
/// Ordering relative to key values is unspecified; the walk is finite and
/// restartable.
pub struct HashTableCursor<'a, K, V> {
    buckets: &'a DynArray<Chain<K, V>>,
    /// Next bucket to open once the current chain is exhausted.
    next_bucket: usize,
    chain: Option<linked_list::Iter<'a, KeyValue<K, V>>>,
    current: Option<&'a KeyValue<K, V>>,
}

impl<'a, K, V> HashTableCursor<'a, K, V> {
    fn new(buckets: &'a DynArray<Chain<K, V>>) -> Self {
        Self {
            buckets,
            next_bucket: 0,
            chain: None,
            current: None,
        }
    }
}

impl<'a, K, V> DictionaryIterator<K, V> for HashTableCursor<'a, K, V> {
    fn move_next(&mut self) -> bool {
        loop {
            if let Some(chain) = self.chain.as_mut() {
                if let Some(entry) = chain.next() {
                    self.current = Some(entry);
                    return true;
                }
                self.chain = None;
            }
            if self.next_bucket >= self.buckets.len() {
                self.current = None;
                return false;
            }
            self.chain = Some(self.buckets[self.next_bucket].iter());
            self.next_bucket += 1;
        }
    }

    fn reset(&mut self) {
        self.next_bucket = 0;
        self.chain = None;
        self.current = None;
    }

    fn current_key(&self) -> Result<&K> {
        self.current
            .map(|entry| &entry.key)
            .ok_or(SdictError::IteratorExhausted)
    }

    fn current_value(&self) -> Result<&V> {
        self.current
            .map(|entry| &entry.value)
            .ok_or(SdictError::IteratorExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::IndexPair;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::hash::Hasher;

    /// Hasher whose output is the raw key bits, making bucket placement
    /// `key % capacity` for integer keys.
    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for (i, b) in bytes.iter().enumerate().take(8) {
                self.0 |= u64::from(*b) << (8 * i);
            }
        }

        fn write_u64(&mut self, value: u64) {
            self.0 = value;
        }

        fn write_usize(&mut self, value: usize) {
            self.0 = value as u64;
        }
    }

    #[derive(Default, Clone)]
    struct IdentityState;

    impl BuildHasher for IdentityState {
        type Hasher = IdentityHasher;

        fn build_hasher(&self) -> IdentityHasher {
            IdentityHasher::default()
        }
    }

    fn identity_table(capacity: usize) -> HashTable<usize, String, IdentityState> {
        HashTable::with_hasher(capacity, IdentityState)
    }

    #[test]
    fn test_scenario_c_collision_chain() {
        let mut table = identity_table(16);
        table.add(1, "One".to_string());
        table.add(17, "Seventeen".to_string());
        table.add(33, "Thirty-Three".to_string());

        // 1, 17 and 33 all land in bucket 1 and chain up in insertion order.
        assert_eq!(table.buckets[1].len(), 3);
        assert_eq!(table.count(), 3);

        assert_eq!(table.remove(&17), Ok("Seventeen".to_string()));
        assert_eq!(table.buckets[1].len(), 2);
        assert_eq!(table.get(&1), Ok(&"One".to_string()));
        assert_eq!(table.get(&33), Ok(&"Thirty-Three".to_string()));
        assert_eq!(table.get(&17), Err(SdictError::KeyNotFound));
    }

    #[test]
    fn test_capacity_doubles_after_threshold() {
        let mut table = identity_table(4);
        table.add(0, "a".to_string());
        table.add(1, "b".to_string());
        table.add(2, "c".to_string());
        // 3/4 load exactly: not above the threshold, no growth yet.
        assert_eq!(table.capacity(), 4);

        table.add(3, "d".to_string());
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.count(), 4);

        // Every pre-existing pair remains retrievable after redistribution.
        for (key, value) in [(0, "a"), (1, "b"), (2, "c"), (3, "d")] {
            assert_eq!(table.get(&key), Ok(&value.to_string()));
        }
    }

    #[test]
    fn test_upsert_never_grows_count() {
        let mut table: HashTable<usize, i32> = HashTable::new();
        for _ in 0..10 {
            table.add(7, 1);
        }
        assert_eq!(table.count(), 1);
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);

        table.add(7, 99);
        assert_eq!(table.get(&7), Ok(&99));
        assert_eq!(table.count(), 1);
    }

    #[test]
    fn test_absent_key_errors() {
        let mut table: HashTable<usize, i32> = HashTable::new();
        table.add(1, 10);

        assert_eq!(table.get(&2), Err(SdictError::KeyNotFound));
        assert_eq!(table.update(&2, 0), Err(SdictError::KeyNotFound));
        assert_eq!(table.remove(&2), Err(SdictError::KeyNotFound));
        assert!(!table.contains_key(&2));
        assert!(table.contains_key(&1));
    }

    #[test]
    fn test_cursor_visits_every_entry_once() {
        let mut table = identity_table(8);
        for key in [3usize, 11, 19, 4, 5] {
            table.add(key, key.to_string());
        }

        let mut cursor = table.cursor();
        assert_eq!(cursor.current_key(), Err(SdictError::IteratorExhausted));

        let mut visited = Vec::new();
        while cursor.move_next() {
            visited.push(*cursor.current_key().unwrap());
        }
        assert!(!cursor.move_next());
        assert_eq!(cursor.current_value(), Err(SdictError::IteratorExhausted));

        // Bucket order with identity hashing: 3, 11, 19 collide in bucket 3.
        assert_eq!(visited, [3, 11, 19, 4, 5]);

        cursor.reset();
        let mut second = Vec::new();
        while cursor.move_next() {
            second.push(*cursor.current_key().unwrap());
        }
        assert_eq!(second, visited);
    }

    #[test]
    fn test_index_pair_keys() {
        let mut table: HashTable<IndexPair, f64> = HashTable::new();
        table.add(IndexPair::new(0, 0), 1.5);
        table.add(IndexPair::new(0, 1), 2.5);
        table.add(IndexPair::new(1, 0), -3.0);

        assert_eq!(table.count(), 3);
        assert_eq!(table.get(&IndexPair::new(0, 1)), Ok(&2.5));
        assert_eq!(table.remove(&IndexPair::new(0, 0)), Ok(1.5));
        assert_eq!(
            table.get(&IndexPair::new(0, 0)),
            Err(SdictError::KeyNotFound)
        );
    }

    #[test]
    #[should_panic(expected = "hash table capacity must be non-zero")]
    fn test_zero_capacity_rejected() {
        let _ = HashTable::<usize, i32>::with_capacity(0);
    }
}
