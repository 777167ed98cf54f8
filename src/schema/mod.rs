//! Relational schema produced by the ER mapping.
//!
//! This module provides:
//! - Table records with ordered primary key, foreign key and column lists
//! - Foreign key edges between tables
//! - The table registry, keyed by name and kept in registration order

use crate::error::SchemaError;
use ahash::AHashMap;
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for a table within a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

/// How a column participates in its table's keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    PrimaryKey,
    /// Part of the primary key and of a foreign key
    PrimaryForeignKey,
    ForeignKey,
    Plain,
}

impl ColumnRole {
    /// Key marker for diagrams
    pub fn marker(self) -> &'static str {
        match self {
            ColumnRole::PrimaryKey => "PK",
            ColumnRole::PrimaryForeignKey => "PK, FK",
            ColumnRole::ForeignKey => "FK",
            ColumnRole::Plain => "",
        }
    }

    pub fn is_primary_key(self) -> bool {
        matches!(self, ColumnRole::PrimaryKey | ColumnRole::PrimaryForeignKey)
    }

    pub fn is_foreign_key(self) -> bool {
        matches!(self, ColumnRole::ForeignKey | ColumnRole::PrimaryForeignKey)
    }
}

/// A relational table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Table name (the registry key, not serialized inside the record)
    #[serde(skip)]
    pub name: String,
    /// Primary key columns (ordered for composite keys)
    pub primary_key: Vec<String>,
    /// Columns participating in some foreign key
    pub foreign_key_columns: Vec<String>,
    /// All columns in order, without repeats
    pub columns: Vec<String>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: Vec::new(),
            foreign_key_columns: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn is_pk_column(&self, name: &str) -> bool {
        self.primary_key.iter().any(|c| c == name)
    }

    pub fn is_fk_column(&self, name: &str) -> bool {
        self.foreign_key_columns.iter().any(|c| c == name)
    }

    /// Classify a column, `None` if the table has no such column
    pub fn column_role(&self, name: &str) -> Option<ColumnRole> {
        if !self.has_column(name) {
            return None;
        }
        let role = match (self.is_pk_column(name), self.is_fk_column(name)) {
            (true, true) => ColumnRole::PrimaryForeignKey,
            (true, false) => ColumnRole::PrimaryKey,
            (false, true) => ColumnRole::ForeignKey,
            (false, false) => ColumnRole::Plain,
        };
        Some(role)
    }

    /// Columns that are neither primary nor foreign key columns
    pub fn plain_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| !self.is_pk_column(c) && !self.is_fk_column(c))
            .map(String::as_str)
    }

    /// Append a column unless it already exists. Returns whether it was added.
    pub(crate) fn push_column(&mut self, name: &str) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.columns.push(name.to_string());
        true
    }

    /// Append a primary key column. A repeated key column is ambiguous.
    pub(crate) fn push_key_column(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.has_column(name) {
            return Err(SchemaError::ambiguous_key(
                &self.name,
                format!("key column '{}' collides with an existing column", name),
            ));
        }
        self.primary_key.push(name.to_string());
        self.columns.push(name.to_string());
        Ok(())
    }

    /// Mark an existing column as a foreign key column
    pub(crate) fn mark_foreign_key(&mut self, name: &str) {
        debug_assert!(self.has_column(name), "FK column must exist: {name}");
        if !self.is_fk_column(name) {
            self.foreign_key_columns.push(name.to_string());
        }
    }
}

/// A foreign key reference from one column to a primary key column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyEdge {
    /// Table holding the foreign key column
    pub from_table: String,
    pub from_column: String,
    /// Referenced table
    pub to_table: String,
    /// Referenced primary key column
    pub to_column: String,
}

impl ForeignKeyEdge {
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
    ) -> Self {
        Self {
            from_table: from_table.into(),
            from_column: from_column.into(),
            to_table: to_table.into(),
            to_column: to_column.into(),
        }
    }
}

impl fmt::Display for ForeignKeyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.from_table, self.from_column, self.to_table, self.to_column
        )
    }
}

/// Complete relational schema: table registry plus foreign key edges
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationalSchema {
    /// Tables in registration order, serialized as a name-keyed map
    #[serde(serialize_with = "serialize_tables")]
    #[schemars(with = "BTreeMap<String, Table>")]
    tables: Vec<Table>,
    /// Map from table name to table ID
    #[serde(skip)]
    index: AHashMap<String, TableId>,
    /// Foreign key edges in registration order
    foreign_keys: Vec<ForeignKeyEdge>,
}

impl PartialEq for RelationalSchema {
    fn eq(&self, other: &Self) -> bool {
        self.tables == other.tables && self.foreign_keys == other.foreign_keys
    }
}

impl Eq for RelationalSchema {}

impl RelationalSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables in registration order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Foreign key edges in registration order
    pub fn foreign_keys(&self) -> &[ForeignKeyEdge] {
        &self.foreign_keys
    }

    /// Get table ID by name
    pub fn get_table_id(&self, name: &str) -> Option<TableId> {
        self.index.get(name).copied()
    }

    /// Get table by ID
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.0 as usize)
    }

    pub(crate) fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.0 as usize)
    }

    /// Get table by name
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.get_table_id(name).and_then(|id| self.table(id))
    }

    /// Register a table, returning its ID. Table names are unique.
    pub(crate) fn add_table(&mut self, table: Table) -> Result<TableId, SchemaError> {
        if self.index.contains_key(&table.name) {
            return Err(SchemaError::malformed(format!(
                "duplicate table name '{}'",
                table.name
            )));
        }
        let id = TableId(self.tables.len() as u32);
        self.index.insert(table.name.clone(), id);
        self.tables.push(table);
        Ok(id)
    }

    /// Register a foreign key edge; an identical edge is recorded once
    pub(crate) fn add_foreign_key(&mut self, edge: ForeignKeyEdge) {
        if !self.foreign_keys.contains(&edge) {
            self.foreign_keys.push(edge);
        }
    }

    /// Foreign key edges leaving the given table
    pub fn foreign_keys_from<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a ForeignKeyEdge> + 'a {
        self.foreign_keys.iter().filter(move |e| e.from_table == table)
    }

    /// Get the number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if schema is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over all tables
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Check the structural invariants of tables and edges.
    /// Returns one message per violation; empty means consistent.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for table in &self.tables {
            if table.primary_key.is_empty() {
                issues.push(format!("{}: empty primary key", table.name));
            }
            for col in table.primary_key.iter().chain(&table.foreign_key_columns) {
                if !table.has_column(col) {
                    issues.push(format!("{}: key column '{}' not in columns", table.name, col));
                }
            }
            for (i, col) in table.columns.iter().enumerate() {
                if table.columns[..i].contains(col) {
                    issues.push(format!("{}: repeated column '{}'", table.name, col));
                }
            }
        }

        for edge in &self.foreign_keys {
            match self.get_table(&edge.from_table) {
                Some(from) if from.is_fk_column(&edge.from_column) => {}
                Some(_) => issues.push(format!("{}: source is not a foreign key column", edge)),
                None => issues.push(format!("{}: unknown source table", edge)),
            }
            match self.get_table(&edge.to_table) {
                Some(to) if to.is_pk_column(&edge.to_column) => {}
                Some(_) => issues.push(format!("{}: target is not a primary key column", edge)),
                None => issues.push(format!("{}: unknown target table", edge)),
            }
        }

        issues
    }

    /// Pretty-printed JSON in the output contract shape
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_tables<S: Serializer>(tables: &[Table], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(tables.len()))?;
    for table in tables {
        map.serialize_entry(&table.name, table)?;
    }
    map.end()
}
