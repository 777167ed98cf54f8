//! ER model consumed by the mapping.
//!
//! This module provides:
//! - Entity, attribute and relationship definitions in declaration order
//! - Closed kinds (`EntityKind`, `Cardinality`) dispatched by the table builder
//! - JSON/YAML loading (see [`load`])

mod load;

pub use load::ModelFormat;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An attribute of an entity or relationship
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Part of the owning entity's primary key
    pub is_primary_key: bool,
    /// Part of a weak entity's partial key
    pub is_partial_key: bool,
    /// Can hold several values per entity instance
    pub is_multi_valued: bool,
    /// Sub-column names of a composite attribute (empty if atomic)
    pub composite: Vec<String>,
}

impl Attribute {
    /// Create an atomic attribute with no flags set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn partial_key(mut self) -> Self {
        self.is_partial_key = true;
        self
    }

    pub fn multi_valued(mut self) -> Self {
        self.is_multi_valued = true;
        self
    }

    pub fn with_composite<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composite = parts.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the attribute decomposes into sub-columns
    pub fn is_composite(&self) -> bool {
        !self.composite.is_empty()
    }

    /// The stored column names: composite sub-names in order, or the name itself
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        let parts = if !self.is_composite() {
            std::slice::from_ref(&self.name)
        } else {
            self.composite.as_slice()
        };
        parts.iter().map(String::as_str)
    }
}

/// Strong vs. weak entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Has its own primary key
    Strong,
    /// Identified through its owner via an identifying relationship
    Weak,
}

/// An entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    /// Entity name (unique within the model)
    pub name: String,
    pub is_weak: bool,
    /// Attributes in declaration order
    pub attributes: Vec<Attribute>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn weak(mut self) -> Self {
        self.is_weak = true;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn kind(&self) -> EntityKind {
        if self.is_weak {
            EntityKind::Weak
        } else {
            EntityKind::Strong
        }
    }
}

/// Participation multiplicity of an entity within a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

impl FromStr for Cardinality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Cardinality::One),
            "N" => Ok(Cardinality::Many),
            other => Err(format!(
                "Unknown cardinality: {:?}. Valid options: 1, N",
                other
            )),
        }
    }
}

/// One side of a binary relationship
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParticipantRef {
    /// Name of the participating entity
    pub name: String,
    /// Raw cardinality as declared ("1" or "N")
    pub cardinality: String,
}

impl ParticipantRef {
    pub fn new(name: impl Into<String>, cardinality: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: cardinality.into(),
        }
    }
}

/// A relationship between two entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationship {
    pub name: String,
    /// Participants in declaration order (exactly two for a valid model)
    pub entities: Vec<ParticipantRef>,
    /// Binds a weak entity to its owner
    pub is_identifying: bool,
    /// Relationship attributes (atomic or composite)
    pub attributes: Vec<Attribute>,
}

impl Relationship {
    /// Create a binary relationship between two participants
    pub fn binary(
        name: impl Into<String>,
        first: ParticipantRef,
        second: ParticipantRef,
    ) -> Self {
        Self {
            name: name.into(),
            entities: vec![first, second],
            ..Self::default()
        }
    }

    pub fn identifying(mut self) -> Self {
        self.is_identifying = true;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A complete ER description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ErModel {
    /// Entities in declaration order
    pub entities: Vec<Entity>,
    /// Relationships in declaration order
    pub relationships: Vec<Relationship>,
}

impl ErModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Get an entity by name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Count of attributes across entities and relationships
    pub fn attribute_count(&self) -> usize {
        self.entities.iter().map(|e| e.attributes.len()).sum::<usize>()
            + self
                .relationships
                .iter()
                .map(|r| r.attributes.len())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_columns() {
        let atomic = Attribute::new("email");
        assert_eq!(atomic.columns().collect::<Vec<_>>(), vec!["email"]);

        let composite = Attribute::new("Addr").with_composite(["street", "city"]);
        assert!(composite.is_composite());
        assert_eq!(composite.columns().collect::<Vec<_>>(), vec!["street", "city"]);
    }

    #[test]
    fn test_cardinality_parsing() {
        assert_eq!("1".parse::<Cardinality>(), Ok(Cardinality::One));
        assert_eq!("N".parse::<Cardinality>(), Ok(Cardinality::Many));
        assert!(" n ".parse::<Cardinality>().is_err());
        assert!("n".parse::<Cardinality>().is_err());
        assert!("1 ".parse::<Cardinality>().is_err());
        assert!("M".parse::<Cardinality>().is_err());
        assert!("".parse::<Cardinality>().is_err());
    }

    #[test]
    fn test_entity_kind() {
        assert_eq!(Entity::new("Order").kind(), EntityKind::Strong);
        assert_eq!(Entity::new("OrderItem").weak().kind(), EntityKind::Weak);
    }

    #[test]
    fn test_model_lookup() {
        let model = ErModel::new()
            .with_entity(Entity::new("Student").with_attribute(Attribute::new("id").primary_key()))
            .with_relationship(Relationship::binary(
                "Enrolls",
                ParticipantRef::new("Student", "N"),
                ParticipantRef::new("Course", "N"),
            ));

        assert!(model.entity("Student").is_some());
        assert!(model.entity("Course").is_none());
        assert_eq!(model.attribute_count(), 1);
    }
}
