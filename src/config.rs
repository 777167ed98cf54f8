//! YAML configuration shared by all commands.
//!
//! Every section is optional; command-line flags override config values.

use crate::graph::{Layout, OutputFormat};
use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default separator between a table name and a key column
pub const DEFAULT_SEPARATOR: &str = "_";

/// Naming of generated tables and columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NamingConfig {
    /// Joins the owner name and key column (`Order` + `orderId` -> `Order_orderId`),
    /// and the entity and attribute names of multivalued child tables
    pub separator: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl NamingConfig {
    /// Qualified name `{prefix}{separator}{name}`
    pub fn qualify(&self, prefix: &str, name: &str) -> String {
        format!("{}{}{}", prefix, self.separator, name)
    }
}

/// Defaults for the graph command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GraphConfig {
    /// Default output format
    pub format: Option<OutputFormat>,
    /// Default layout direction
    pub layout: Option<Layout>,
    /// Only include tables matching these glob patterns
    #[serde(default)]
    pub tables: Vec<String>,
    /// Exclude tables matching these glob patterns
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Complete YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ErConfig {
    pub naming: NamingConfig,
    pub graph: GraphConfig,
}

impl ErConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: ErConfig = serde_yaml_ng::from_str(content)?;
        if config.naming.separator.is_empty() {
            anyhow::bail!("naming.separator must not be empty");
        }
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
