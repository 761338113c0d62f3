//! Error taxonomy for parsing, ordering and decoding.
//!
//! Synthesis never fails: NOT NULL fallbacks are reported through
//! [`crate::insert::GenerationWarning`] instead of an error.

use thiserror::Error;

/// Errors surfaced by the seeding core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// Table name or column block could not be located in a CREATE TABLE statement
    #[error("malformed DDL{}: {reason}", table.as_ref().map(|t| format!(" for table '{t}'")).unwrap_or_default())]
    MalformedDdl {
        table: Option<String>,
        reason: String,
    },

    /// The same table name appears in more than one statement
    #[error("table '{table}' is defined more than once")]
    DuplicateTable { table: String },

    /// Foreign keys form a cycle, so no creation order exists.
    ///
    /// `tables` lists every table that could not be ordered: the cycle
    /// members and any table that depends on them.
    #[error("cyclic foreign key dependency; tables blocked by the cycle: {}", tables.join(", "))]
    CyclicDependency { tables: Vec<String> },

    /// Every decode strategy failed on a text backend response
    #[error("could not decode a list from output: {snippet}")]
    UnparsableOutput { snippet: String },
}

impl SeedError {
    pub(crate) fn malformed(table: Option<&str>, reason: impl Into<String>) -> Self {
        SeedError::MalformedDdl {
            table: table.map(str::to_string),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SeedError>;
