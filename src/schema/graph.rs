//! Foreign key dependency graph over CREATE TABLE statements.
//!
//! Provides:
//! - Dependency graph construction from `REFERENCES <table>` occurrences
//! - Topological sorting so referenced tables are created first
//! - Cycle detection, surfaced as [`SeedError::CyclicDependency`]

use super::{extract_create_table_name, extract_referenced_tables};
use crate::error::{Result, SeedError};
use ahash::AHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

/// Position of a table in the input statement list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

/// Table-level dependency graph built from foreign key references.
///
/// The graph represents parent → child relationships where:
/// - A parent is a table referenced by another table's FK
/// - A child is a table that has an FK referencing another table
///
/// Self-references are recorded separately and never count toward in-degree:
/// such a table can be created standalone and filled incrementally.
#[derive(Debug)]
pub struct DependencyGraph {
    /// Table names in input order, indexed by TableId
    pub names: Vec<String>,
    /// For each table, tables it references via FK
    pub parents: Vec<Vec<TableId>>,
    /// For each table, tables that reference it via FK
    pub children: Vec<Vec<TableId>>,
    /// Tables that reference themselves
    pub self_referencing: Vec<bool>,
}

/// Result of topological sort
#[derive(Debug)]
pub struct TopoSortResult {
    /// Tables in topological order (parents before children)
    pub order: Vec<TableId>,
    /// Tables that could not be ordered (part of, or downstream of, a cycle)
    pub cyclic_tables: Vec<TableId>,
}

impl DependencyGraph {
    /// Build a dependency graph from CREATE TABLE statements.
    ///
    /// References to tables outside the statement set are ignored: they
    /// cannot be ordered here and do not block creation.
    pub fn from_statements<S: AsRef<str>>(statements: &[S]) -> Result<Self> {
        let n = statements.len();
        let mut names = Vec::with_capacity(n);
        let mut ids: AHashMap<String, TableId> = AHashMap::with_capacity(n);

        for stmt in statements {
            let name = extract_create_table_name(stmt.as_ref()).ok_or_else(|| {
                SeedError::malformed(None, "no table name after CREATE TABLE")
            })?;
            let key = name.to_lowercase();
            if ids.contains_key(&key) {
                return Err(SeedError::DuplicateTable { table: name });
            }
            ids.insert(key, TableId(names.len() as u32));
            names.push(name);
        }

        let mut parents: Vec<Vec<TableId>> = vec![Vec::new(); n];
        let mut children: Vec<Vec<TableId>> = vec![Vec::new(); n];
        let mut self_referencing = vec![false; n];

        for (i, stmt) in statements.iter().enumerate() {
            let child_id = TableId(i as u32);

            for referenced in extract_referenced_tables(stmt.as_ref()) {
                let Some(&parent_id) = ids.get(&referenced.to_lowercase()) else {
                    tracing::warn!(
                        table = %names[i],
                        referenced = %referenced,
                        "reference to a table outside the statement set ignored"
                    );
                    continue;
                };

                if parent_id == child_id {
                    self_referencing[i] = true;
                    continue;
                }

                if !parents[i].contains(&parent_id) {
                    parents[i].push(parent_id);
                }
                if !children[parent_id.0 as usize].contains(&child_id) {
                    children[parent_id.0 as usize].push(child_id);
                }
            }
        }

        Ok(Self {
            names,
            parents,
            children,
            self_referencing,
        })
    }

    /// Get the number of tables in the graph
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the table name for a table ID
    pub fn table_name(&self, id: TableId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Check if a table has a self-referential FK
    pub fn has_self_reference(&self, id: TableId) -> bool {
        self.self_referencing
            .get(id.0 as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Perform topological sort using Kahn's algorithm.
    ///
    /// Ready tables are taken lowest input position first, so an input that
    /// is already in valid order comes back unchanged.
    pub fn topo_sort(&self) -> TopoSortResult {
        let n = self.len();

        let mut in_degree: Vec<usize> = self.parents.iter().map(Vec::len).collect();

        let mut ready: BinaryHeap<Reverse<TableId>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| Reverse(TableId(i as u32)))
            .collect();

        let mut order = Vec::with_capacity(n);

        while let Some(Reverse(table_id)) = ready.pop() {
            order.push(table_id);

            for &child_id in &self.children[table_id.0 as usize] {
                in_degree[child_id.0 as usize] -= 1;
                if in_degree[child_id.0 as usize] == 0 {
                    ready.push(Reverse(child_id));
                }
            }
        }

        let cyclic_tables: Vec<TableId> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg > 0)
            .map(|(i, _)| TableId(i as u32))
            .collect();

        TopoSortResult {
            order,
            cyclic_tables,
        }
    }

    /// Creation order of all tables, or the unorderable tables on a cycle
    pub fn creation_order(&self) -> Result<Vec<TableId>> {
        let result = self.topo_sort();
        if result.order.len() < self.len() {
            let tables = result
                .cyclic_tables
                .iter()
                .filter_map(|&id| self.table_name(id).map(str::to_string))
                .collect();
            return Err(SeedError::CyclicDependency { tables });
        }
        Ok(result.order)
    }
}

/// Reorder CREATE TABLE statements so every referenced table precedes its referencers.
pub fn resolve_order<S: AsRef<str>>(statements: &[S]) -> Result<Vec<String>> {
    let graph = DependencyGraph::from_statements(statements)?;
    let order = graph.creation_order()?;

    let self_referencing = graph.self_referencing.iter().filter(|&&s| s).count();
    tracing::debug!(
        tables = graph.len(),
        self_referencing,
        "resolved creation order"
    );

    Ok(order
        .into_iter()
        .map(|id| statements[id.0 as usize].as_ref().to_string())
        .collect())
}
