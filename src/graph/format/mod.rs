//! Output format implementations for ERD visualization.

mod dot;
pub(crate) mod json;
mod mermaid;

pub use dot::to_dot;
pub use json::to_json;
pub use json::{ColumnJson, ErdJson, ErdStats, RelationshipJson, TableJson};
pub use mermaid::to_mermaid;

use super::view::GraphView;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for ERD export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Graphviz DOT format (ERD style)
    #[default]
    Dot,
    /// Mermaid erDiagram format
    Mermaid,
    /// JSON format for programmatic use
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Valid options: dot, mermaid, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "dot" | "gv" => Some(OutputFormat::Dot),
            "mmd" | "mermaid" => Some(OutputFormat::Mermaid),
            "json" => Some(OutputFormat::Json),
            "png" | "svg" | "pdf" => Some(OutputFormat::Dot), // Will be rendered
            _ => None,
        }
    }
}

/// Layout direction for diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Left to right
    #[default]
    LR,
    /// Top to bottom
    TB,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "left-right" | "horizontal" => Ok(Layout::LR),
            "tb" | "td" | "top-bottom" | "top-down" | "vertical" => Ok(Layout::TB),
            _ => Err(format!("Unknown layout: {}. Valid options: lr, tb", s)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::LR => write!(f, "lr"),
            Layout::TB => write!(f, "tb"),
        }
    }
}

impl OutputFormat {
    /// Whether an output path asks for an image rendered by Graphviz
    pub fn is_image_extension(ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "png" | "svg" | "pdf")
    }

    /// Render a view in this format
    pub fn render(self, view: &GraphView, layout: Layout, title: &str) -> String {
        match self {
            OutputFormat::Dot => to_dot(view, layout, title),
            OutputFormat::Mermaid => to_mermaid(view),
            OutputFormat::Json => to_json(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("graphviz".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert_eq!("MMD".parse::<OutputFormat>(), Ok(OutputFormat::Mermaid));
        assert!("html".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::from_extension("svg"), Some(OutputFormat::Dot));
        assert_eq!(OutputFormat::from_extension("txt"), None);
        assert!(OutputFormat::is_image_extension("PNG"));
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!("top-down".parse::<Layout>(), Ok(Layout::TB));
        assert_eq!(Layout::default(), Layout::LR);
        assert!("diagonal".parse::<Layout>().is_err());
    }
}
