//! Shared key universe for primary and foreign key columns.

use super::SqlValue;
use crate::schema::ColumnType;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Type class of a key column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Integer-like keys, drawn from `1..=N`
    Int,
    /// Character keys, drawn from `fk_value_0..fk_value_{N-1}`
    Varchar,
}

impl KeyClass {
    /// Key class for a column type, if keys of that type are pooled
    pub fn for_type(col_type: &ColumnType) -> Option<Self> {
        match col_type {
            ColumnType::Int => Some(KeyClass::Int),
            ColumnType::Text => Some(KeyClass::Varchar),
            _ => None,
        }
    }
}

/// Candidate key values per type class, indexed by row position.
///
/// Built once per request before any table is processed so every table
/// shares the same key universe: row `i` of any table gets key `i`, and a
/// foreign key may point at any entry.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPool {
    ints: Vec<SqlValue>,
    varchars: Vec<SqlValue>,
}

impl KeyPool {
    /// Pool with `rows` entries per class
    pub fn new(rows: usize) -> Self {
        Self {
            ints: (1..=rows as i64).map(SqlValue::Int).collect(),
            varchars: (0..rows)
                .map(|i| SqlValue::Text(format!("fk_value_{i}")))
                .collect(),
        }
    }

    /// Entries for one class
    pub fn slice(&self, class: KeyClass) -> &[SqlValue] {
        match class {
            KeyClass::Int => &self.ints,
            KeyClass::Varchar => &self.varchars,
        }
    }

    /// Deterministic key for a row
    pub fn key_at(&self, class: KeyClass, row: usize) -> Option<&SqlValue> {
        self.slice(class).get(row)
    }

    /// Uniformly sampled key of a class
    pub fn sample<R: Rng + ?Sized>(&self, class: KeyClass, rng: &mut R) -> Option<&SqlValue> {
        self.slice(class).choose(rng)
    }

    /// Number of entries per class
    pub fn len(&self) -> usize {
        self.ints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty()
    }
}
