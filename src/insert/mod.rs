//! INSERT statement generation for parsed tables.
//!
//! Tables are processed in foreign key order. Every table draws its key
//! columns from one [`KeyPool`] built up front, so foreign keys always
//! point at a row index that the referenced table also populates.

mod warnings;

pub use warnings::{GenerationWarning, WarningCollector};

use crate::error::Result;
use crate::schema::{parse_create_table, resolve_order, TableSchema};
use crate::synth::{synthesize_value, KeyPool, SqlValue};
use rand::Rng;
use serde::Serialize;

/// Literal substituted for NOT NULL columns whose type has no generator
pub const DEFAULT_PLACEHOLDER: &str = "default_value";

/// INSERT statements for one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableInserts {
    pub table: String,
    pub statements: Vec<String>,
}

/// Output of [`populate`]
#[derive(Debug, Clone, Default)]
pub struct PopulateResult {
    /// Per-table statements in dependency order
    pub tables: Vec<TableInserts>,
    pub warnings: Vec<GenerationWarning>,
}

impl PopulateResult {
    /// All statements flattened in execution order
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .flat_map(|t| t.statements.iter().map(String::as_str))
    }
}

/// Options for [`populate`]
#[derive(Debug, Clone)]
pub struct PopulateOptions {
    /// Rows per table
    pub rows: usize,
    /// NOT NULL fallback literal
    pub placeholder: String,
    /// Tables to order but not populate (case-insensitive)
    pub skip_tables: Vec<String>,
}

impl PopulateOptions {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            skip_tables: Vec::new(),
        }
    }

    fn is_skipped(&self, table: &str) -> bool {
        self.skip_tables
            .iter()
            .any(|t| t.eq_ignore_ascii_case(table))
    }
}

/// Generates INSERT statements against a shared key pool
#[derive(Debug)]
pub struct InsertGenerator<R> {
    pool: KeyPool,
    rows: usize,
    rng: R,
    placeholder: String,
    warnings: WarningCollector,
}

impl<R: Rng> InsertGenerator<R> {
    /// Generator for `rows` rows per table with a freshly built key pool
    pub fn new(rows: usize, rng: R) -> Self {
        Self {
            pool: KeyPool::new(rows),
            rows,
            rng,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            warnings: WarningCollector::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }

    /// One INSERT per row index `0..rows`
    pub fn generate_table(&mut self, table: &TableSchema) -> Vec<String> {
        // Identifiers keep the DDL's quoting and schema prefix
        let columns: Vec<&str> = table
            .insertable_columns()
            .map(|c| c.ident.as_str())
            .collect();
        let column_list = columns.join(", ");

        (0..self.rows)
            .map(|row| {
                let values = self.row_values(table, row).join(", ");
                format!(
                    "INSERT INTO {} ({}) VALUES ({});",
                    table.ident, column_list, values
                )
            })
            .collect()
    }

    /// Rendered values of one row, aligned with `insertable_columns`
    fn row_values(&mut self, table: &TableSchema, row: usize) -> Vec<String> {
        let mut values = Vec::with_capacity(table.columns.len());

        for column in &table.columns {
            let Some(value) = synthesize_value(column, &self.pool, row, &mut self.rng) else {
                continue;
            };

            let value = if value.is_null() && column.forbids_null() {
                self.warn_placeholder(table, &column.name, &column.sql_type);
                SqlValue::Text(self.placeholder.clone())
            } else {
                value
            };

            values.push(value.to_sql());
        }

        values
    }

    fn warn_placeholder(&mut self, table: &TableSchema, column: &str, sql_type: &str) {
        let warning = GenerationWarning::ConstraintViolationRisk {
            table: table.name.clone(),
            column: column.to_string(),
            sql_type: sql_type.to_string(),
            placeholder: self.placeholder.clone(),
        };
        if !self.warnings.warnings().contains(&warning) {
            tracing::warn!(
                table = %table.name,
                column = %column,
                sql_type = %sql_type,
                placeholder = %self.placeholder,
                "NOT NULL column has no generator for its type, substituting placeholder"
            );
        }
        self.warnings.add(warning);
    }

    pub fn add_warning(&mut self, warning: GenerationWarning) {
        self.warnings.add(warning);
    }

    pub fn into_warnings(self) -> Vec<GenerationWarning> {
        self.warnings.into_warnings()
    }
}

/// Order CREATE TABLE statements by foreign keys and generate INSERTs for each.
pub fn populate<S, R>(statements: &[S], options: &PopulateOptions, rng: R) -> Result<PopulateResult>
where
    S: AsRef<str>,
    R: Rng,
{
    let ordered = resolve_order(statements)?;
    let tables = ordered
        .iter()
        .map(|stmt| parse_create_table(stmt))
        .collect::<Result<Vec<_>>>()?;

    let mut generator =
        InsertGenerator::new(options.rows, rng).with_placeholder(options.placeholder.clone());
    let mut out = Vec::with_capacity(tables.len());

    for table in &tables {
        if options.is_skipped(&table.name) {
            tracing::debug!(table = %table.name, "skipping table");
            generator.add_warning(GenerationWarning::SkippedTable {
                table: table.name.clone(),
            });
            continue;
        }

        let statements = generator.generate_table(table);
        tracing::debug!(table = %table.name, rows = statements.len(), "generated inserts");
        out.push(TableInserts {
            table: table.name.clone(),
            statements,
        });
    }

    Ok(PopulateResult {
        tables: out,
        warnings: generator.into_warnings(),
    })
}
