//! Mermaid erDiagram format output.

use crate::graph::view::GraphView;

/// Attribute type placeholder; the ER model carries no column types
const COLUMN_TYPE: &str = "column";

/// Generate Mermaid erDiagram from a graph view
pub fn to_mermaid(view: &GraphView) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for table in &view.tables {
        let safe_name = escape_mermaid_id(&table.name);
        output.push_str(&format!("    {} {{\n", safe_name));

        for col in &table.columns {
            let key_marker = col.role.marker();
            let col_name = escape_mermaid_id(&col.name);

            if key_marker.is_empty() {
                output.push_str(&format!("        {} {}\n", COLUMN_TYPE, col_name));
            } else {
                output.push_str(&format!(
                    "        {} {} {}\n",
                    COLUMN_TYPE, col_name, key_marker
                ));
            }
        }

        output.push_str("    }\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        output.push_str(&format!(
            "    {} {} {} : \"{}\"\n",
            escape_mermaid_id(&edge.from_table),
            edge.as_mermaid(),
            escape_mermaid_id(&edge.to_table),
            edge.from_column
        ));
    }

    output
}

/// Escape a string for use as a Mermaid entity ID
fn escape_mermaid_id(s: &str) -> String {
    // Mermaid IDs should be alphanumeric with underscores
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::view::tests::create_test_view;

    #[test]
    fn test_mermaid_er_diagram() {
        let view = create_test_view();
        let output = to_mermaid(&view);

        assert!(output.starts_with("erDiagram\n"));
        assert!(output.contains("    Customer {\n"));
        assert!(output.contains("    OrderItem {\n"));
    }

    #[test]
    fn test_mermaid_columns() {
        let view = create_test_view();
        let output = to_mermaid(&view);

        assert!(output.contains("column id PK\n"));
        assert!(output.contains("column email\n"));
        assert!(output.contains("column Order_orderId PK, FK\n"));
        assert!(output.contains("column Customer_id FK\n"));
    }

    #[test]
    fn test_mermaid_relationships() {
        let view = create_test_view();
        let output = to_mermaid(&view);

        assert!(output.contains("OrderItem }o--|| Order : \"Order_orderId\""));
        assert!(output.contains("Order }o..|| Customer : \"Customer_id\""));
    }

    #[test]
    fn test_escape_mermaid_id() {
        assert_eq!(escape_mermaid_id("line-item"), "line_item");
    }
}
