//! Graphviz DOT format output for relational diagrams.

use crate::graph::format::Layout;
use crate::graph::view::{GraphView, TableInfo};

/// Generate DOT output: one HTML-like table per relation, one port per column,
/// and one edge per foreign key column pointing at the referenced key column
pub fn to_dot(view: &GraphView, layout: Layout, title: &str) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!("// {}\n", title.replace('\n', " ")));
    output.push_str("digraph Relational {\n");
    output.push_str("  graph [splines=spline, bgcolor=\"white\", pad=\"0.5\", nodesep=\"1\", ranksep=\"1.5\"];\n");

    // Layout direction
    let rankdir = match layout {
        Layout::LR => "LR",
        Layout::TB => "TB",
    };
    output.push_str(&format!("  rankdir={};\n", rankdir));
    output.push_str("  node [shape=plain];\n\n");

    for table in &view.tables {
        let label = generate_table_label(table);
        output.push_str(&format!(
            "  {} [label=<{}>];\n",
            escape_dot_id(&table.name),
            label
        ));
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        let style = if edge.identifying { "solid" } else { "dashed" };
        output.push_str(&format!(
            "  {}:{} -> {}:{} [style={}];\n",
            escape_dot_id(&edge.from_table),
            escape_dot_id(&edge.from_column),
            escape_dot_id(&edge.to_table),
            escape_dot_id(&edge.to_column),
            style
        ));
    }

    output.push_str("}\n");
    output
}

/// HTML-like table label: header row, then one row per column with its key
/// marker. Primary key columns are underlined.
fn generate_table_label(table: &TableInfo) -> String {
    let mut html = String::new();

    html.push_str("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">");
    html.push_str(&format!(
        "<TR><TD COLSPAN=\"2\" BGCOLOR=\"lightblue\"><B>{}</B></TD></TR>",
        escape_html(&table.name)
    ));

    for col in &table.columns {
        let name = escape_html(&col.name);
        let display = if col.role.is_primary_key() {
            format!("<U>{}</U>", name)
        } else {
            name.clone()
        };
        html.push_str(&format!(
            "<TR><TD ALIGN=\"LEFT\" PORT=\"{}\">{}</TD><TD>{}</TD></TR>",
            name,
            display,
            col.role.marker()
        ));
    }

    html.push_str("</TABLE>");
    html
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') && !s.is_empty() {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
