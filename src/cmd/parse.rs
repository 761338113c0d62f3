//! Parse command - show the column model extracted from each CREATE TABLE.

use super::io_util::load_create_tables;
use crate::schema::{parse_create_table, Column, TableSchema};
use anyhow::Result;
use std::path::PathBuf;

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let statements = load_create_tables(&file)?;

    let tables = statements
        .iter()
        .map(|stmt| parse_create_table(stmt))
        .collect::<Result<Vec<TableSchema>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    if tables.is_empty() {
        eprintln!("No tables found in the input.");
    }

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({} columns)", table.name, table.columns.len());
        for col in &table.columns {
            println!("  {}", describe_column(col));
        }
    }

    Ok(())
}

fn describe_column(col: &Column) -> String {
    let mut line = match col.size {
        Some(size) => format!("{} {}({})", col.name, col.sql_type, size),
        None => format!("{} {}", col.name, col.sql_type),
    };
    if col.not_null {
        line.push_str(" NOT NULL");
    }
    if col.is_primary_key {
        line.push_str(" [PK]");
    }
    if col.is_foreign_key {
        line.push_str(" [FK]");
    }
    if col.auto_increment {
        line.push_str(" [auto]");
    }
    line
}
