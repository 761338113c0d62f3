//! Normalize command - decode a text backend response into a JSON list.

use super::io_util::{open_output, read_input};
use crate::normalize::normalize_output;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

pub fn run(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let raw = read_input(&file)?;
    let items = normalize_output(&raw)?;

    let mut writer = open_output(output.as_ref())?;
    serde_json::to_writer_pretty(&mut writer, &items)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
