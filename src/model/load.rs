//! Loading ER models from JSON or YAML.

use super::ErModel;
use anyhow::Context;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Serialized form of an ER model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ModelFormat::Json),
            "yaml" | "yml" => Ok(ModelFormat::Yaml),
            _ => Err(format!(
                "Unknown model format: {}. Valid options: json, yaml",
                s
            )),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFormat::Json => write!(f, "json"),
            ModelFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl ModelFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ModelFormat::Json),
            "yaml" | "yml" => Some(ModelFormat::Yaml),
            _ => None,
        }
    }

    /// Detect format from a path, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

impl ErModel {
    /// Parse a model from a JSON document
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let model: ErModel = serde_json::from_str(input)?;
        Ok(model)
    }

    /// Parse a model from a YAML document
    pub fn from_yaml(input: &str) -> anyhow::Result<Self> {
        let model: ErModel = serde_yaml_ng::from_str(input)?;
        Ok(model)
    }

    /// Parse a model in the given format
    pub fn parse(input: &str, format: ModelFormat) -> anyhow::Result<Self> {
        match format {
            ModelFormat::Json => Self::from_json(input),
            ModelFormat::Yaml => Self::from_yaml(input),
        }
    }

    /// Load a model from a file, picking the format from its extension
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let format = ModelFormat::from_path(path);
        Self::parse(&content, format)
            .with_context(|| format!("failed to parse {} as {}", path.display(), format))
    }
}
