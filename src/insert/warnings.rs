//! Warnings raised while generating INSERT statements.
//!
//! Generation is best-effort per value: a column that cannot be filled
//! correctly is recorded here and filled with a placeholder instead.

use serde::Serialize;

/// Warning types that can occur during generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    /// A NOT NULL column has a type with no generator; a placeholder was inserted
    ConstraintViolationRisk {
        table: String,
        column: String,
        sql_type: String,
        placeholder: String,
    },
    /// Table was left out on request
    SkippedTable { table: String },
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationWarning::ConstraintViolationRisk {
                table,
                column,
                sql_type,
                placeholder,
            } => write!(
                f,
                "{}.{} is NOT NULL but type {} has no generator; inserted placeholder '{}'",
                table, column, sql_type, placeholder
            ),
            GenerationWarning::SkippedTable { table } => {
                write!(f, "Skipped table '{}' (configured skip)", table)
            }
        }
    }
}

/// Collects warnings during generation
#[derive(Debug, Default)]
pub struct WarningCollector {
    warnings: Vec<GenerationWarning>,
    max_warnings: usize,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            max_warnings: 100,
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            warnings: Vec::new(),
            max_warnings: limit,
        }
    }

    /// Add a warning; repeats of the same table/column are dropped
    pub fn add(&mut self, warning: GenerationWarning) {
        if self.warnings.len() < self.max_warnings && !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[GenerationWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn into_warnings(self) -> Vec<GenerationWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(column: &str) -> GenerationWarning {
        GenerationWarning::ConstraintViolationRisk {
            table: "t".into(),
            column: column.into(),
            sql_type: "BLOB".into(),
            placeholder: "default_value".into(),
        }
    }

    #[test]
    fn test_deduplicates_and_limits() {
        let mut collector = WarningCollector::with_limit(2);
        collector.add(risk("a"));
        collector.add(risk("a"));
        collector.add(risk("b"));
        collector.add(risk("c"));
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.warnings()[1], risk("b"));
    }
}
