//! Primary key resolution for entities.

use crate::error::SchemaError;
use crate::model::{Entity, EntityKind};

/// Resolve an entity's primary key columns.
///
/// Composite key attributes expand in place to their sub-columns; order follows
/// attribute declaration. A strong entity must declare at least one key
/// attribute. Weak entities declare none, so an empty list is returned for them
/// and the inherited key is built by the table builder.
pub fn resolve_primary_key(entity: &Entity) -> Result<Vec<String>, SchemaError> {
    let mut key: Vec<String> = Vec::new();

    for attribute in entity.attributes.iter().filter(|a| a.is_primary_key) {
        for column in attribute.columns() {
            if key.iter().any(|k| k == column) {
                return Err(SchemaError::ambiguous_key(
                    &entity.name,
                    format!("primary key column '{}' is declared twice", column),
                ));
            }
            key.push(column.to_string());
        }
    }

    if key.is_empty() && entity.kind() == EntityKind::Strong {
        return Err(SchemaError::ambiguous_key(&entity.name, "no primary key"));
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    #[test]
    fn test_simple_key() {
        let entity = Entity::new("Student")
            .with_attribute(Attribute::new("id").primary_key())
            .with_attribute(Attribute::new("name"));
        assert_eq!(resolve_primary_key(&entity).unwrap(), vec!["id"]);
    }

    #[test]
    fn test_composite_key_expands_in_place() {
        let entity = Entity::new("Building")
            .with_attribute(Attribute::new("campus").primary_key())
            .with_attribute(
                Attribute::new("Addr")
                    .primary_key()
                    .with_composite(["street", "city"]),
            )
            .with_attribute(Attribute::new("floors"));

        assert_eq!(
            resolve_primary_key(&entity).unwrap(),
            vec!["campus", "street", "city"]
        );
    }

    #[test]
    fn test_missing_key_is_error() {
        let entity = Entity::new("Student").with_attribute(Attribute::new("name"));
        let err = resolve_primary_key(&entity).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ambiguous_key("Student", "no primary key")
        );
    }

    #[test]
    fn test_repeated_key_column_is_error() {
        let entity = Entity::new("Place")
            .with_attribute(Attribute::new("city").primary_key())
            .with_attribute(
                Attribute::new("Addr")
                    .primary_key()
                    .with_composite(["street", "city"]),
            );
        assert!(matches!(
            resolve_primary_key(&entity),
            Err(SchemaError::AmbiguousKey { .. })
        ));
    }

    #[test]
    fn test_weak_entity_has_empty_key() {
        let entity = Entity::new("OrderItem")
            .weak()
            .with_attribute(Attribute::new("lineNo").partial_key());
        assert!(resolve_primary_key(&entity).unwrap().is_empty());
    }
}
