//! Input loading and output selection shared by the commands.

use crate::normalize::normalize_output;
use crate::schema::{is_create_table, split_statements};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }

    if !path.exists() {
        bail!("input file does not exist: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// CREATE TABLE statements from a SQL script or a list of statements.
///
/// Text starting with `[` or a code fence is decoded as a list (as produced
/// by a text backend); anything else is split on top-level semicolons.
pub fn load_create_tables(path: &Path) -> Result<Vec<String>> {
    let text = read_input(path)?;
    Ok(create_tables_from_text(&text)?)
}

pub fn create_tables_from_text(text: &str) -> crate::error::Result<Vec<String>> {
    let head = text.trim_start();
    let statements = if head.starts_with('[') || head.starts_with("```") {
        normalize_output(text)?
            .into_iter()
            .flat_map(|s| split_statements(&s))
            .collect()
    } else {
        split_statements(text)
    };

    Ok(statements
        .into_iter()
        .filter(|stmt| {
            let keep = is_create_table(stmt);
            if !keep {
                let first_line = stmt.lines().next().unwrap_or("");
                tracing::debug!(statement = %first_line, "skipping non CREATE TABLE statement");
            }
            keep
        })
        .collect())
}

/// Buffered writer for a file, or stdout when no path is given
pub fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}
