//! Graph view with table filtering for ERD generation.

use crate::schema::{ColumnRole, RelationalSchema};
use ahash::AHashSet;
use glob::Pattern;

/// Information about a column in a table
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Key participation
    pub role: ColumnRole,
    /// If FK, which table it references
    pub references_table: Option<String>,
    /// If FK, which column it references
    pub references_column: Option<String>,
}

/// Information about a table for ERD rendering
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// All columns in order
    pub columns: Vec<ColumnInfo>,
}

/// Information about an edge (FK relationship) in the graph
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    /// Source table (child with FK)
    pub from_table: String,
    /// Source column (FK column)
    pub from_column: String,
    /// Target table (parent being referenced)
    pub to_table: String,
    /// Target column (always part of the parent's primary key)
    pub to_column: String,
    /// The FK column is part of the child's primary key
    pub identifying: bool,
}

impl EdgeInfo {
    /// Mermaid ERD notation: child (many) to parent (exactly one)
    pub fn as_mermaid(&self) -> &'static str {
        if self.identifying {
            "}o--||"
        } else {
            "}o..||"
        }
    }
}

/// A filtered view of a relational schema for ERD visualization
#[derive(Debug)]
pub struct GraphView {
    /// Tables included in this view, in schema order
    pub tables: Vec<TableInfo>,
    /// Edges between tables (FK relationships)
    pub edges: Vec<EdgeInfo>,
}

impl GraphView {
    /// Create a full view from a schema (all tables and edges)
    pub fn from_schema(schema: &RelationalSchema) -> Self {
        let tables = schema
            .iter()
            .map(|table| {
                let columns = table
                    .columns
                    .iter()
                    .map(|col| {
                        let reference = schema
                            .foreign_keys_from(&table.name)
                            .find(|e| &e.from_column == col);

                        ColumnInfo {
                            name: col.clone(),
                            role: table.column_role(col).unwrap_or(ColumnRole::Plain),
                            references_table: reference.map(|e| e.to_table.clone()),
                            references_column: reference.map(|e| e.to_column.clone()),
                        }
                    })
                    .collect();

                TableInfo {
                    name: table.name.clone(),
                    columns,
                }
            })
            .collect();

        let edges = schema
            .foreign_keys()
            .iter()
            .map(|fk| EdgeInfo {
                from_table: fk.from_table.clone(),
                from_column: fk.from_column.clone(),
                to_table: fk.to_table.clone(),
                to_column: fk.to_column.clone(),
                identifying: schema
                    .get_table(&fk.from_table)
                    .is_some_and(|t| t.is_pk_column(&fk.from_column)),
            })
            .collect();

        Self { tables, edges }
    }

    /// Filter to include only tables matching the given patterns
    pub fn filter_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }

        let matching: AHashSet<String> = self
            .tables
            .iter()
            .map(|t| &t.name)
            .filter(|name| patterns.iter().any(|p| p.matches(name)))
            .cloned()
            .collect();

        self.apply_node_filter(&matching);
    }

    /// Exclude tables matching the given patterns
    pub fn exclude_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }

        let remaining: AHashSet<String> = self
            .tables
            .iter()
            .map(|t| &t.name)
            .filter(|name| !patterns.iter().any(|p| p.matches(name)))
            .cloned()
            .collect();

        self.apply_node_filter(&remaining);
    }

    /// Get the number of tables in the view
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Get the number of edges in the view
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of columns across all tables in the view
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get table info by name
    pub fn get_table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name == name)
    }

    fn apply_node_filter(&mut self, keep: &AHashSet<String>) {
        self.tables.retain(|t| keep.contains(&t.name));
        self.edges
            .retain(|e| keep.contains(&e.from_table) && keep.contains(&e.to_table));
    }
}

/// Compile comma-separated or listed glob patterns, rejecting invalid ones
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>, String> {
    patterns
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .map(|p| Pattern::new(p).map_err(|e| format!("invalid table pattern '{}': {}", p, e)))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Attribute, Entity, ErModel, ParticipantRef, Relationship};

    /// Order/OrderItem/Customer schema shared by the format tests
    pub(crate) fn create_test_view() -> GraphView {
        let model = ErModel::new()
            .with_entity(
                Entity::new("Customer")
                    .with_attribute(Attribute::new("id").primary_key())
                    .with_attribute(Attribute::new("email")),
            )
            .with_entity(Entity::new("Order").with_attribute(Attribute::new("orderId").primary_key()))
            .with_entity(
                Entity::new("OrderItem")
                    .weak()
                    .with_attribute(Attribute::new("lineNo").partial_key()),
            )
            .with_relationship(
                Relationship::binary(
                    "Contains",
                    ParticipantRef::new("Order", "1"),
                    ParticipantRef::new("OrderItem", "N"),
                )
                .identifying(),
            )
            .with_relationship(Relationship::binary(
                "Places",
                ParticipantRef::new("Order", "N"),
                ParticipantRef::new("Customer", "1"),
            ));

        GraphView::from_schema(&crate::mapping::map_model(&model).unwrap())
    }

    #[test]
    fn test_table_info() {
        let view = create_test_view();
        assert_eq!(view.table_count(), 3);
        let names: Vec<_> = view.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Customer", "Order", "OrderItem"]);

        let item = view.get_table("OrderItem").unwrap();
        assert_eq!(item.columns[0].role, ColumnRole::PrimaryForeignKey);
        assert_eq!(item.columns[0].references_table.as_deref(), Some("Order"));
        assert_eq!(item.columns[0].references_column.as_deref(), Some("orderId"));
        assert_eq!(item.columns[1].role, ColumnRole::PrimaryKey);
    }

    #[test]
    fn test_edge_info() {
        let view = create_test_view();
        assert_eq!(view.edge_count(), 2);

        let identifying = &view.edges[0];
        assert_eq!(identifying.from_table, "OrderItem");
        assert!(identifying.identifying);
        assert_eq!(identifying.as_mermaid(), "}o--||");

        let places = &view.edges[1];
        assert_eq!(places.from_column, "Customer_id");
        assert!(!places.identifying);
        assert_eq!(places.as_mermaid(), "}o..||");
    }

    #[test]
    fn test_exclude_tables() {
        let mut view = create_test_view();
        let patterns = compile_patterns(&["Order*"]).unwrap();
        view.exclude_tables(&patterns);

        assert!(view.get_table("Order").is_none());
        assert!(view.get_table("Customer").is_some());
        assert_eq!(view.edge_count(), 0);
    }

    #[test]
    fn test_filter_tables() {
        let mut view = create_test_view();
        let patterns = compile_patterns(&["Order", " OrderItem ", ""]).unwrap();
        view.filter_tables(&patterns);

        assert_eq!(view.table_count(), 2);
        assert_eq!(view.edge_count(), 1);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(compile_patterns(&["[abc"]).is_err());
    }
}
