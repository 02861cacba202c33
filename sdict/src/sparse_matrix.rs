//! Sparse matrix keyed by (row, column) pairs

use sdict_core::{Dictionary, DictionaryIterator, DynArray, IndexPair, KeyValue, Result, SdictError};

/// Two-dimensional counterpart of [`SparseVector`](crate::SparseVector)
///
/// Stores non-default elements under composite [`IndexPair`] keys in one
/// owned dictionary. With the tree engine, iteration yields entries in
/// row-major order; with the hash engine the order is unspecified.
pub struct SparseMatrix<V> {
    rows: usize,
    columns: usize,
    elements: Box<dyn Dictionary<IndexPair, V>>,
}

impl<V: Clone + Default + PartialEq> SparseMatrix<V> {
    /// Wrap an already-constructed dictionary, taking ownership of it
    pub fn new(rows: usize, columns: usize, dictionary: Box<dyn Dictionary<IndexPair, V>>) -> Self {
        Self {
            rows,
            columns,
            elements: dictionary,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Number of stored (non-default) elements
    pub fn nnz(&self) -> usize {
        self.elements.count()
    }

    /// Element at `(row, column)`, or the default value when none is stored
    pub fn get_element(&self, row: usize, column: usize) -> Result<V> {
        let key = self.check_position(row, column)?;
        match self.elements.get(&key) {
            Ok(value) => Ok(value.clone()),
            Err(SdictError::KeyNotFound) => Ok(V::default()),
            Err(err) => Err(err),
        }
    }

    /// Store `value` at `(row, column)`; the default value elides the entry
    pub fn set_element(&mut self, row: usize, column: usize, value: V) -> Result<()> {
        let key = self.check_position(row, column)?;
        if value == V::default() {
            return self.remove_element(row, column);
        }
        self.elements.add(key, value);
        Ok(())
    }

    /// Drop the entry at `(row, column)`; absent entries are a no-op
    pub fn remove_element(&mut self, row: usize, column: usize) -> Result<()> {
        let key = self.check_position(row, column)?;
        if self.elements.contains_key(&key) {
            self.elements.remove(&key)?;
        }
        Ok(())
    }

    /// Replace every stored element with `f` applied to it
    ///
    /// Updates are snapshotted before any is applied; a result equal to the
    /// default elides the entry.
    pub fn map<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&V) -> V,
    {
        let mut updates: DynArray<KeyValue<IndexPair, V>> = DynArray::new();
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

    /// Visit every stored `(position, value)` pair
    pub fn for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(IndexPair, &V),
    {
        let mut cursor = self.elements.iter();
        while cursor.move_next() {
            f(*cursor.current_key()?, cursor.current_value()?);
        }
        Ok(())
    }

    /// Stored entries of one row as `(column, value)` pairs
    ///
    /// Pairs arrive in the dictionary's iteration order; the tree engine
    /// yields them by ascending column.
    pub fn row_entries(&self, row: usize) -> Result<DynArray<KeyValue<usize, V>>> {
        if row >= self.rows {
            return Err(SdictError::IndexOutOfRange);
        }
        let mut entries = DynArray::new();
        let mut cursor = self.elements.iter();
        while cursor.move_next() {
            let key = *cursor.current_key()?;
            if key.row == row {
                entries.push(KeyValue::new(key.column, cursor.current_value()?.clone()));
            }
        }
        Ok(entries)
    }

    /// Stored entries of one column as `(row, value)` pairs
    pub fn column_entries(&self, column: usize) -> Result<DynArray<KeyValue<usize, V>>> {
        if column >= self.columns {
            return Err(SdictError::IndexOutOfRange);
        }
        let mut entries = DynArray::new();
        let mut cursor = self.elements.iter();
        while cursor.move_next() {
            let key = *cursor.current_key()?;
            if key.column == column {
                entries.push(KeyValue::new(key.row, cursor.current_value()?.clone()));
            }
        }
        Ok(entries)
    }

    /// Cursor over the stored entries
    pub fn iter(&self) -> Box<dyn DictionaryIterator<IndexPair, V> + '_> {
        self.elements.iter()
    }

    /// The backing dictionary
    pub fn elements(&self) -> &dyn Dictionary<IndexPair, V> {
        self.elements.as_ref()
    }

    fn check_position(&self, row: usize, column: usize) -> Result<IndexPair> {
        if row >= self.rows || column >= self.columns {
            return Err(SdictError::IndexOutOfRange);
        }
        Ok(IndexPair::new(row, column))
    }
}
