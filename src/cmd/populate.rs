//! Populate command - synthesize INSERT statements for a schema.

use super::io_util::{load_create_tables, open_output};
use crate::config::PopulateYamlConfig;
use crate::insert::populate;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    rows: Option<usize>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    placeholder: Option<String>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let yaml = match config {
        Some(ref path) => PopulateYamlConfig::load(path)?,
        None => PopulateYamlConfig::default(),
    };
    let options = yaml.to_options(rows, placeholder);

    // Generate random seed if not provided
    let seed = seed.or(yaml.seed).unwrap_or_else(rand::random);
    if verbose {
        eprintln!("Using seed {} ({} rows per table)", seed, options.rows);
    }

    let statements = load_create_tables(&file)?;
    if statements.is_empty() {
        eprintln!("No tables found in the input.");
        return Ok(());
    }

    let result = populate(&statements, &options, StdRng::seed_from_u64(seed))?;

    let mut writer = open_output(output.as_ref())?;
    if json {
        let grouped: Vec<&Vec<String>> = result.tables.iter().map(|t| &t.statements).collect();
        serde_json::to_writer_pretty(&mut writer, &grouped)?;
        writeln!(writer)?;
    } else {
        for (i, table) in result.tables.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            for stmt in &table.statements {
                writeln!(writer, "{}", stmt)?;
            }
        }
    }
    writer.flush()?;

    if verbose || output.is_some() {
        let total: usize = result.tables.iter().map(|t| t.statements.len()).sum();
        eprintln!(
            "Generated {} INSERT statements for {} tables.",
            total,
            result.tables.len()
        );
    }

    if !result.warnings.is_empty() {
        eprintln!();
        for warning in &result.warnings {
            eprintln!("  Warning: {}", warning);
        }
    }

    Ok(())
}
