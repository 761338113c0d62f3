//! Type-aware value synthesis for a single column.
//!
//! Precedence for each column:
//! 1. Auto-increment columns are omitted
//! 2. Primary key columns take the row's entry from the [`KeyPool`]
//! 3. Foreign key columns sample any entry from the [`KeyPool`]
//! 4. Everything else gets a uniform random value by declared type
//!
//! Unrecognized types yield [`SqlValue::Null`]; NOT NULL handling happens
//! in the insert generator.

mod pool;
mod value;

pub use pool::{KeyClass, KeyPool};
pub use value::SqlValue;

use crate::schema::{Column, ColumnType};
use chrono::DateTime;
use rand::distr::Alphabetic;
use rand::{Rng, RngExt};

/// 2000-01-01 00:00:00 UTC
const RANGE_START_SECS: i64 = 946_684_800;
/// 2025-01-01 00:00:00 UTC
const RANGE_END_SECS: i64 = 1_735_689_600;
const SECS_PER_DAY: i64 = 86_400;

const INT_RANGE: (i64, i64) = (1, 1000);
const DECIMAL_RANGE: (f64, f64) = (1.0, 9999.0);
const TEXT_MIN_LEN: usize = 3;
const TEXT_DEFAULT_LEN: usize = 10;
const TEXT_MAX_LEN: usize = 15;

/// Produce the value of `column` for row `row`.
///
/// Returns `None` when the column must be left out of the INSERT entirely.
pub fn synthesize_value<R: Rng + ?Sized>(
    column: &Column,
    pool: &KeyPool,
    row: usize,
    rng: &mut R,
) -> Option<SqlValue> {
    if column.auto_increment {
        return None;
    }

    let col_type = column.type_class();
    let key_class = KeyClass::for_type(&col_type);

    if let Some(class) = key_class {
        if column.is_primary_key {
            if let Some(key) = pool.key_at(class, row) {
                return Some(key.clone());
            }
        } else if column.is_foreign_key {
            if let Some(key) = pool.sample(class, rng) {
                return Some(key.clone());
            }
        }
    }

    Some(random_value(&col_type, column.size, rng))
}

/// Uniform random value for a column type
pub fn random_value<R: Rng + ?Sized>(
    col_type: &ColumnType,
    size: Option<u32>,
    rng: &mut R,
) -> SqlValue {
    match col_type {
        ColumnType::Int => SqlValue::Int(rng.random_range(INT_RANGE.0..=INT_RANGE.1)),
        ColumnType::Decimal => {
            let n: f64 = rng.random_range(DECIMAL_RANGE.0..=DECIMAL_RANGE.1);
            SqlValue::Decimal((n * 100.0).round() / 100.0)
        }
        ColumnType::Text => SqlValue::Text(random_text(size, rng)),
        ColumnType::Date => {
            let days = rng.random_range(0..=(RANGE_END_SECS - RANGE_START_SECS) / SECS_PER_DAY);
            format_timestamp(RANGE_START_SECS + days * SECS_PER_DAY, "%Y-%m-%d")
        }
        ColumnType::DateTime => {
            let secs = rng.random_range(RANGE_START_SECS..=RANGE_END_SECS);
            format_timestamp(secs, "%Y-%m-%d %H:%M:%S")
        }
        ColumnType::Other(_) => SqlValue::Null,
    }
}

/// Random alphabetic string of length in `[3, min(size or 10, 15)]`
fn random_text<R: Rng + ?Sized>(size: Option<u32>, rng: &mut R) -> String {
    let max = size
        .map(|s| s as usize)
        .unwrap_or(TEXT_DEFAULT_LEN)
        .min(TEXT_MAX_LEN);
    // Columns narrower than the minimum get exactly their declared width
    let min = TEXT_MIN_LEN.min(max);
    let len = rng.random_range(min..=max);
    (0..len).map(|_| char::from(rng.sample(Alphabetic))).collect()
}

fn format_timestamp(secs: i64, fmt: &str) -> SqlValue {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| SqlValue::Text(dt.format(fmt).to_string()))
        .unwrap_or(SqlValue::Null)
}
