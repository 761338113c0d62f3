//! YAML configuration for the populate command.
//!
//! ```yaml
//! rows: 25
//! seed: 42
//! placeholder: "n/a"
//! tables:
//!   audit_log:
//!     skip: true
//! ```

use crate::insert::{PopulateOptions, DEFAULT_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Per-table settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Order the table but generate no rows for it
    pub skip: bool,
}

/// Complete YAML configuration for populate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateYamlConfig {
    /// Rows per table
    pub rows: Option<usize>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// NOT NULL fallback literal
    pub placeholder: Option<String>,
    /// Per-table settings
    pub tables: HashMap<String, TableConfig>,
}

impl PopulateYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: PopulateYamlConfig = serde_yaml_ng::from_str(content)?;
        Ok(config)
    }

    /// Populate options with command-line values taking precedence.
    /// Skipped table names match case-insensitively at generation time.
    pub fn to_options(&self, rows: Option<usize>, placeholder: Option<String>) -> PopulateOptions {
        let mut options = PopulateOptions::new(rows.or(self.rows).unwrap_or(DEFAULT_ROWS));
        options.placeholder = placeholder
            .or_else(|| self.placeholder.clone())
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
        options.skip_tables = self
            .tables
            .iter()
            .filter(|(_, t)| t.skip)
            .map(|(name, _)| name.clone())
            .collect();
        options.skip_tables.sort();
        options
    }
}

/// Rows per table when neither flag nor config sets one
pub const DEFAULT_ROWS: usize = 10;
