//! Schema module for seeding-aware DDL handling.
//!
//! This module provides:
//! - Data models for tables and their column descriptors
//! - DDL parsing of single CREATE TABLE statements
//! - Foreign key dependency ordering with cycle detection

mod ddl;
mod graph;

pub use ddl::*;
pub use graph::*;

use serde::Serialize;

/// Coarse SQL type classification used to pick a value generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer types: INT, INTEGER, TINYINT, SMALLINT, MEDIUMINT, BIGINT, SERIAL
    Int,
    /// Decimal/floating point types
    Decimal,
    /// Character types: CHAR, VARCHAR, TEXT, etc.
    Text,
    /// Calendar date
    Date,
    /// Date plus time of day: DATETIME, TIMESTAMP
    DateTime,
    /// Any other type
    Other(String),
}

impl ColumnType {
    /// Classify a SQL type keyword such as `VARCHAR` or `int(11)`.
    pub fn from_sql_type(type_str: &str) -> Self {
        let type_lower = type_str.to_lowercase();
        let base_type = type_lower.split('(').next().unwrap_or(&type_lower).trim();

        match base_type {
            "int" | "integer" | "tinyint" | "smallint" | "mediumint" | "bigint" | "int2"
            | "int4" | "int8" | "serial" | "smallserial" | "bigserial" => ColumnType::Int,
            "char" | "varchar" | "nchar" | "nvarchar" | "text" | "tinytext" | "mediumtext"
            | "longtext" | "character" | "string" | "clob" => ColumnType::Text,
            "decimal" | "numeric" | "float" | "double" | "real" | "float4" | "float8"
            | "money" => ColumnType::Decimal,
            "date" => ColumnType::Date,
            "datetime" | "timestamp" | "timestamptz" => ColumnType::DateTime,
            _ => ColumnType::Other(type_str.to_uppercase()),
        }
    }

    /// Whether the type is one of the auto-incrementing pseudo types (PostgreSQL)
    pub fn is_serial_keyword(type_str: &str) -> bool {
        matches!(
            type_str.to_lowercase().as_str(),
            "serial" | "smallserial" | "bigserial"
        )
    }
}

/// Column descriptor within a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Name as written in the DDL, quoting included; used when rendering SQL
    #[serde(skip)]
    pub ident: String,
    /// Uppercase SQL type keyword (INT, VARCHAR, DATE, ...)
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Declared size, e.g. the 50 of VARCHAR(50)
    pub size: Option<u32>,
    /// Whether NOT NULL was declared
    pub not_null: bool,
    /// Whether the database assigns the value (never emitted in INSERTs)
    pub auto_increment: bool,
    /// Whether this column is part of the primary key
    pub is_primary_key: bool,
    /// Whether this column is constrained by a foreign key
    pub is_foreign_key: bool,
}

impl Column {
    /// Create a nullable, unconstrained column
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ident: name.clone(),
            name,
            sql_type: sql_type.into().to_uppercase(),
            size: None,
            not_null: false,
            auto_increment: false,
            is_primary_key: false,
            is_foreign_key: false,
        }
    }

    /// Coarse type class of this column
    pub fn type_class(&self) -> ColumnType {
        ColumnType::from_sql_type(&self.sql_type)
    }

    /// NULL is rejected both for NOT NULL columns and primary key members
    pub fn forbids_null(&self) -> bool {
        self.not_null || self.is_primary_key
    }
}

/// Parsed CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    /// Table name, unquoted
    pub name: String,
    /// Name as written in the DDL, schema prefix and quoting included
    #[serde(skip)]
    pub ident: String,
    /// Column definitions in declaration order
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a new empty table schema
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ident: name.clone(),
            name,
            columns: Vec::new(),
        }
    }

    /// Keep the identifier exactly as the DDL spelled it
    pub fn with_ident(mut self, ident: impl Into<String>) -> Self {
        self.ident = ident.into();
        self
    }

    /// Get a column by name (case-insensitive)
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn get_column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Columns that receive a value in generated INSERTs, in declaration order
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.auto_increment)
    }

    /// Names of the primary key columns
    pub fn primary_key(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of the foreign key columns
    pub fn foreign_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_foreign_key)
            .map(|c| c.name.as_str())
            .collect()
    }
}
