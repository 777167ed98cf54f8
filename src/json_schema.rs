//! JSON Schema generation for inputs and JSON outputs.
//!
//! Schemas are generated with schemars and exported via the `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// All JSON schemas, keyed by name.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // YAML config file
    schemas.insert("config", schema_for!(crate::config::ErConfig));

    // graph command with --format json
    schemas.insert("graph", schema_for!(crate::graph::format::ErdJson));

    // map command output
    schemas.insert("relational", schema_for!(crate::schema::RelationalSchema));

    // ER model input
    schemas.insert("model", schema_for!(crate::model::ErModel));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(schema_names(), vec!["config", "graph", "model", "relational"]);
        assert!(get_schema("relational").is_some());
        assert!(get_schema("split").is_none());
    }

    #[test]
    fn test_relational_schema_shape() {
        let schema = serde_json::to_value(get_schema("relational").unwrap()).unwrap();
        let props = &schema["properties"];
        assert!(props.get("tables").is_some());
        assert!(props.get("foreignKeys").is_some());
        assert!(props.get("index").is_none());
    }
}
