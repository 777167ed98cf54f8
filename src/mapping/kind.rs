//! Model checks and relationship classification.
//!
//! Everything here runs before any table is built, so a malformed model fails
//! without producing partial output.

use crate::error::SchemaError;
use crate::model::{Attribute, Cardinality, EntityKind, ErModel, Relationship};
use ahash::AHashSet;

/// How a relationship maps onto tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind<'m> {
    /// Binds a weak entity to its owner; consumed by the entity pass
    Identifying { owner: &'m str, weak: &'m str },
    /// N:1 or 1:N; the many side receives the foreign key
    ManyToOne { many: &'m str, one: &'m str },
    /// N:N or 1:1; mapped through a junction table
    Junction,
}

/// Classify a relationship against the model's entities
pub fn classify<'m>(
    relationship: &'m Relationship,
    model: &'m ErModel,
) -> Result<RelationshipKind<'m>, SchemaError> {
    if relationship.name.trim().is_empty() {
        return Err(SchemaError::malformed("relationship without a name"));
    }

    let [first, second] = relationship.entities.as_slice() else {
        return Err(SchemaError::malformed(format!(
            "relationship '{}' must have exactly two participants, found {}",
            relationship.name,
            relationship.entities.len()
        )));
    };

    let mut cardinalities = [Cardinality::One; 2];
    for (slot, participant) in cardinalities.iter_mut().zip([first, second]) {
        if model.entity(&participant.name).is_none() {
            return Err(SchemaError::malformed(format!(
                "relationship '{}' references undeclared entity '{}'",
                relationship.name, participant.name
            )));
        }
        *slot = participant.cardinality.parse().map_err(|_| {
            SchemaError::UnsupportedCardinality {
                relationship: relationship.name.clone(),
                entity: participant.name.clone(),
                value: participant.cardinality.clone(),
            }
        })?;
    }

    for attribute in &relationship.attributes {
        if attribute.is_primary_key || attribute.is_partial_key || attribute.is_multi_valued {
            return Err(SchemaError::malformed(format!(
                "relationship attribute '{}.{}' cannot be a key or multivalued",
                relationship.name, attribute.name
            )));
        }
    }

    if relationship.is_identifying {
        let is_weak = |name: &str| {
            model
                .entity(name)
                .is_some_and(|e| e.kind() == EntityKind::Weak)
        };
        return match (is_weak(&first.name), is_weak(&second.name)) {
            (true, false) => Ok(RelationshipKind::Identifying {
                owner: &second.name,
                weak: &first.name,
            }),
            (false, true) => Ok(RelationshipKind::Identifying {
                owner: &first.name,
                weak: &second.name,
            }),
            _ => Err(SchemaError::malformed(format!(
                "identifying relationship '{}' must have exactly one weak participant",
                relationship.name
            ))),
        };
    }

    Ok(match (cardinalities[0], cardinalities[1]) {
        (Cardinality::Many, Cardinality::One) => RelationshipKind::ManyToOne {
            many: &first.name,
            one: &second.name,
        },
        (Cardinality::One, Cardinality::Many) => RelationshipKind::ManyToOne {
            many: &second.name,
            one: &first.name,
        },
        (Cardinality::Many, Cardinality::Many) | (Cardinality::One, Cardinality::One) => {
            RelationshipKind::Junction
        }
    })
}

/// Check entity-level structure: names, uniqueness and attribute flags
pub fn check_entities(model: &ErModel) -> Result<(), SchemaError> {
    let mut seen = AHashSet::new();

    for entity in &model.entities {
        if entity.name.trim().is_empty() {
            return Err(SchemaError::malformed("entity without a name"));
        }
        if !seen.insert(entity.name.as_str()) {
            return Err(SchemaError::malformed(format!(
                "duplicate entity name '{}'",
                entity.name
            )));
        }

        for attribute in &entity.attributes {
            check_attribute(&entity.name, attribute)?;
            if attribute.is_primary_key && attribute.is_multi_valued {
                return Err(SchemaError::malformed(format!(
                    "attribute '{}.{}' cannot be both primary key and multivalued",
                    entity.name, attribute.name
                )));
            }
            if attribute.is_primary_key && entity.kind() == EntityKind::Weak {
                return Err(SchemaError::malformed(format!(
                    "weak entity '{}' declares primary key attribute '{}'",
                    entity.name, attribute.name
                )));
            }
        }
    }

    Ok(())
}

fn check_attribute(owner: &str, attribute: &Attribute) -> Result<(), SchemaError> {
    if attribute.name.trim().is_empty() {
        return Err(SchemaError::malformed(format!(
            "attribute without a name in '{}'",
            owner
        )));
    }
    if attribute.composite.iter().any(|c| c.trim().is_empty()) {
        return Err(SchemaError::malformed(format!(
            "composite attribute '{}.{}' has an empty sub-column name",
            owner, attribute.name
        )));
    }
    Ok(())
}
