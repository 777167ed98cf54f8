//! ERD (relational diagram) generation module.
//!
//! This module provides:
//! - A view over a mapped relational schema with per-column key roles
//! - Table include/exclude filtering with glob patterns
//! - Multiple output formats: DOT (Graphviz), Mermaid, JSON

pub mod format;
pub mod view;

pub use format::{to_dot, to_json, to_mermaid, Layout, OutputFormat};
pub use view::{compile_patterns, ColumnInfo, EdgeInfo, GraphView, TableInfo};
