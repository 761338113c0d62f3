//! Order command - output CREATE TABLE statements in foreign key order.

use super::io_util::{load_create_tables, open_output};
use crate::error::SeedError;
use crate::schema::DependencyGraph;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

/// Run the order command
pub fn run(file: PathBuf, output: Option<PathBuf>, json: bool, check: bool) -> Result<()> {
    let statements = load_create_tables(&file)?;

    if statements.is_empty() {
        eprintln!("No tables found in the input.");
        return Ok(());
    }

    let graph = DependencyGraph::from_statements(&statements)?;
    let order = match graph.creation_order() {
        Ok(order) => order,
        Err(e @ SeedError::CyclicDependency { .. }) => {
            if check {
                eprintln!("Check FAILED: Cannot determine valid ordering due to cycles.");
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let self_referencing: Vec<&str> = order
        .iter()
        .filter(|&&id| graph.has_self_reference(id))
        .filter_map(|&id| graph.table_name(id))
        .collect();

    if check {
        eprintln!("Check PASSED: Tables can be ordered topologically.");
        eprintln!("\nSuggested order ({} tables):", order.len());
        for (i, id) in order.iter().enumerate() {
            if let Some(name) = graph.table_name(*id) {
                eprintln!("  {}. {}", i + 1, name);
            }
        }
        if !self_referencing.is_empty() {
            eprintln!(
                "\nSelf-referencing tables (populate incrementally): {}",
                self_referencing.join(", ")
            );
        }
        return Ok(());
    }

    let ordered: Vec<&str> = order
        .iter()
        .map(|id| statements[id.0 as usize].as_str())
        .collect();

    let mut writer = open_output(output.as_ref())?;
    if json {
        serde_json::to_writer_pretty(&mut writer, &ordered)?;
        writeln!(writer)?;
    } else {
        for stmt in &ordered {
            writeln!(writer, "{};", stmt)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    if let Some(ref out_path) = output {
        eprintln!("Ordered schema written to: {}", out_path.display());
    }

    Ok(())
}
