//! Key types shared by the dictionary engines and their consumers

use core::hash::{Hash, Hasher};

/// Multiplier applied to the row index before mixing.
pub const ROW_HASH_MULTIPLIER: u64 = 73_856_093;
/// Multiplier applied to the column index before mixing.
pub const COLUMN_HASH_MULTIPLIER: u64 = 19_349_663;
/// Knuth-style multiplicative constant decorrelating the column contribution.
pub const COLUMN_HASH_MIXER: u64 = 2_654_435_761;

/// A plain key/value pair
///
/// Used as the entry type of hash-table collision chains and as the snapshot
/// buffer element for bulk updates in the sparse containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValue<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValue<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// Composite `(row, column)` key for matrix-shaped dictionaries
///
/// Ordered by row first, then column. Hashing mixes the two indices with
/// distinct multiplicative constants so that rows and columns of a dense
/// index grid do not collide into the same buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPair {
    pub row: usize,
    pub column: usize,
}

impl IndexPair {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl Hash for IndexPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let row = (self.row as u64).wrapping_mul(ROW_HASH_MULTIPLIER);
        let column = (self.column as u64).wrapping_mul(COLUMN_HASH_MULTIPLIER);
        state.write_u64(row ^ column.wrapping_mul(COLUMN_HASH_MIXER));
    }
}

impl core::fmt::Display for IndexPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
