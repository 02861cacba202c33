//! Sparse vector over an owned dictionary

use sdict_core::{Dictionary, DictionaryIterator, DynArray, KeyValue, Result, SdictError};

/// Fixed-length vector storing only its non-default elements
///
/// Holds one dictionary from index to value, taken by ownership at
/// construction; any engine satisfying the contract works. An index absent
/// from the dictionary logically reads as `V::default()`, and setting an
/// index to the default removes the entry instead of storing it; the
/// dictionary never holds a default value under any key.
pub struct SparseVector<V> {
    length: usize,
    elements: Box<dyn Dictionary<usize, V>>,
}

impl<V: Clone + Default + PartialEq> SparseVector<V> {
    /// Wrap an already-constructed dictionary, taking ownership of it
    pub fn new(length: usize, dictionary: Box<dyn Dictionary<usize, V>>) -> Self {
        Self {
            length,
            elements: dictionary,
        }
    }

    /// Logical length; indices range over `[0, length)`
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of stored (non-default) elements
    pub fn nnz(&self) -> usize {
        self.elements.count()
    }

    /// Element at `index`, or the default value when none is stored
    ///
    /// Fails only with `IndexOutOfRange`; an absent entry is not an error.
    pub fn get_element(&self, index: usize) -> Result<V> {
        self.check_index(index)?;
        match self.elements.get(&index) {
            Ok(value) => Ok(value.clone()),
            Err(SdictError::KeyNotFound) => Ok(V::default()),
            Err(err) => Err(err),
        }
    }

    /// Store `value` at `index`; the default value elides the entry
    pub fn set_element(&mut self, index: usize, value: V) -> Result<()> {
        self.check_index(index)?;
        if value == V::default() {
            return self.remove_element(index);
        }
        self.elements.add(index, value);
        Ok(())
    }

    /// Drop the entry at `index`; absent entries are a no-op
    pub fn remove_element(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if self.elements.contains_key(&index) {
            self.elements.remove(&index)?;
        }
        Ok(())
    }

    /// Replace every stored element with `f` applied to it
    ///
    /// All updates are snapshotted before any is applied: mutating the
    /// dictionary while one of its cursors is live is not possible, so the
    /// traversal completes first. A result equal to the default elides the
    /// entry, preserving sparseness.
    pub fn map<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&V) -> V,
    {
        let mut updates: DynArray<KeyValue<usize, V>> = DynArray::new();
        {
            let mut cursor = self.elements.iter();
            while cursor.move_next() {
                let key = *cursor.current_key()?;
                let value = f(cursor.current_value()?);
                updates.push(KeyValue::new(key, value));
            }
        }
        for entry in updates.iter() {
            if entry.value == V::default() {
                self.elements.remove(&entry.key)?;
            } else {
                self.elements.update(&entry.key, entry.value.clone())?;
            }
        }
        Ok(())
    }

    /// Fold `f` over the stored elements, starting from `initial`
    ///
    /// Only non-default entries participate, in the dictionary's iteration
    /// order.
    pub fn reduce<F>(&self, mut f: F, initial: V) -> Result<V>
    where
        F: FnMut(V, &V) -> V,
    {
        let mut result = initial;
        let mut cursor = self.elements.iter();
        while cursor.move_next() {
            result = f(result, cursor.current_value()?);
        }
        Ok(result)
    }

    /// Visit every stored `(index, value)` pair
    pub fn for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &V),
    {
        let mut cursor = self.elements.iter();
        while cursor.move_next() {
            f(*cursor.current_key()?, cursor.current_value()?);
        }
        Ok(())
    }

    /// Cursor over the stored entries
    pub fn iter(&self) -> Box<dyn DictionaryIterator<usize, V> + '_> {
        self.elements.iter()
    }

    /// The backing dictionary
    pub fn elements(&self) -> &dyn Dictionary<usize, V> {
        self.elements.as_ref()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.length {
            return Err(SdictError::IndexOutOfRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdict_core::{BTree, HashTable};

    fn engines() -> Vec<Box<dyn Dictionary<usize, f64>>> {
        vec![
            Box::new(BTree::<usize, f64>::default()),
            Box::new(HashTable::<usize, f64>::new()),
        ]
    }

    #[test]
    fn test_scenario_d_map_and_reduce() {
        for engine in engines() {
            let mut vector = SparseVector::new(10, engine);
            vector.set_element(2, 3.5).unwrap();
            vector.map(|x| x * 2.0).unwrap();
            assert_eq!(vector.get_element(2).unwrap(), 7.0);

            vector.set_element(0, 1.0).unwrap();
            vector.set_element(4, -4.4).unwrap();
            let sum = vector.reduce(|acc, x| acc + x, 0.0).unwrap();
            assert!((sum - 3.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_default_elision() {
        for engine in engines() {
            let mut vector = SparseVector::new(10, engine);
            vector.set_element(3, 5.0).unwrap();
            assert_eq!(vector.nnz(), 1);

            // Writing the default removes the entry instead of storing it.
            vector.set_element(3, 0.0).unwrap();
            assert_eq!(vector.nnz(), 0);
            assert!(!vector.elements().contains_key(&3));
            assert_eq!(vector.get_element(3).unwrap(), 0.0);

            // A never-set index reads as the default.
            assert_eq!(vector.get_element(9).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_map_result_equal_to_default_elides() {
        for engine in engines() {
            let mut vector = SparseVector::new(4, engine);
            vector.set_element(1, 2.0).unwrap();
            vector.set_element(2, 3.0).unwrap();

            vector.map(|x| x - 2.0).unwrap();
            assert_eq!(vector.nnz(), 1);
            assert_eq!(vector.get_element(1).unwrap(), 0.0);
            assert_eq!(vector.get_element(2).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_bounds_checks() {
        for engine in engines() {
            let mut vector = SparseVector::new(10, engine);
            assert_eq!(
                vector.get_element(10).unwrap_err(),
                SdictError::IndexOutOfRange
            );
            assert_eq!(
                vector.set_element(10, 1.0).unwrap_err(),
                SdictError::IndexOutOfRange
            );
            assert_eq!(
                vector.remove_element(99).unwrap_err(),
                SdictError::IndexOutOfRange
            );
        }
    }

    #[test]
    fn test_remove_element_absent_is_noop() {
        for engine in engines() {
            let mut vector = SparseVector::new(10, engine);
            vector.set_element(1, 1.5).unwrap();
            vector.remove_element(2).unwrap();
            assert_eq!(vector.nnz(), 1);
            vector.remove_element(1).unwrap();
            assert_eq!(vector.nnz(), 0);
        }
    }

    #[test]
    fn test_for_each_visits_stored_entries() {
        let mut vector = SparseVector::new(10, Box::new(BTree::<usize, f64>::default()));
        vector.set_element(4, 4.0).unwrap();
        vector.set_element(1, 1.0).unwrap();
        vector.set_element(7, 7.0).unwrap();

        // Tree engine: entries arrive in ascending index order.
        let mut seen = Vec::new();
        vector.for_each(|index, value| seen.push((index, *value))).unwrap();
        assert_eq!(seen, [(1, 1.0), (4, 4.0), (7, 7.0)]);
    }

    #[test]
    fn test_engines_agree_under_random_writes() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xd1c7);
        let mut tree_backed = SparseVector::new(64, Box::new(BTree::<usize, f64>::default()));
        let mut hash_backed = SparseVector::new(64, Box::new(HashTable::<usize, f64>::new()));

        for _ in 0..500 {
            let index = rng.gen_range(0..64);
            // Zero writes hit the elision path, others the store path.
            let value = if rng.gen_bool(0.3) {
                0.0
            } else {
                rng.gen_range(-10.0..10.0)
            };
            tree_backed.set_element(index, value).unwrap();
            hash_backed.set_element(index, value).unwrap();
        }

        assert_eq!(tree_backed.nnz(), hash_backed.nnz());
        for index in 0..64 {
            assert_eq!(
                tree_backed.get_element(index).unwrap(),
                hash_backed.get_element(index).unwrap()
            );
        }
    }

    #[test]
    fn test_zero_length_vector() {
        let vector = SparseVector::<f64>::new(0, Box::new(BTree::default()));
        assert!(vector.is_empty());
        assert_eq!(
            vector.get_element(0).unwrap_err(),
            SdictError::IndexOutOfRange
        );
    }
}
