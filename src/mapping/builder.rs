//! Table builder: drives the entity pass and the relationship pass over one
//! registry instance.

use super::kind::{check_entities, classify, RelationshipKind};
use crate::config::NamingConfig;
use crate::error::SchemaError;
use crate::model::{EntityKind, ErModel, Relationship};
use crate::schema::{ForeignKeyEdge, RelationalSchema, Table, TableId};

/// Builds the relational schema for one ER model.
///
/// The builder owns the registry for the duration of a run and hands it out
/// from [`TableBuilder::build`]. Entities are fully mapped (strong first, then
/// weak) before any relationship is processed.
pub struct TableBuilder<'m> {
    pub(super) model: &'m ErModel,
    pub(super) naming: NamingConfig,
    pub(super) schema: RelationalSchema,
}

impl<'m> TableBuilder<'m> {
    pub fn new(model: &'m ErModel) -> Self {
        Self {
            model,
            naming: NamingConfig::default(),
            schema: RelationalSchema::new(),
        }
    }

    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    /// Run both passes and return the finished schema
    pub fn build(mut self) -> Result<RelationalSchema, SchemaError> {
        let model = self.model;
        check_entities(model)?;
        let kinds: Vec<(&'m Relationship, RelationshipKind<'m>)> = model
            .relationships
            .iter()
            .map(|r| classify(r, model).map(|kind| (r, kind)))
            .collect::<Result<_, _>>()?;

        for entity in &model.entities {
            if entity.kind() == EntityKind::Strong {
                self.map_strong_entity(entity)?;
            }
        }
        for entity in &model.entities {
            if entity.kind() == EntityKind::Weak {
                let (relationship, owner) = identifying_owner(&kinds, &entity.name)?;
                self.map_weak_entity(entity, owner, relationship)?;
            }
        }

        for (relationship, kind) in &kinds {
            match *kind {
                RelationshipKind::Identifying { .. } => continue,
                RelationshipKind::ManyToOne { many, one } => {
                    self.map_many_to_one(relationship, many, one)?
                }
                RelationshipKind::Junction => self.map_junction(relationship)?,
            }
        }

        Ok(self.schema)
    }

    /// ID of an already registered table
    pub(super) fn table_id(&self, name: &str) -> Result<TableId, SchemaError> {
        self.schema.get_table_id(name).ok_or_else(|| {
            SchemaError::malformed(format!("table '{}' has not been built", name))
        })
    }

    /// Primary key of an already registered table
    pub(super) fn primary_key_of(&self, name: &str) -> Result<Vec<String>, SchemaError> {
        let id = self.table_id(name)?;
        Ok(self
            .schema
            .table(id)
            .map(|t| t.primary_key.clone())
            .unwrap_or_default())
    }

    pub(super) fn table_mut(&mut self, id: TableId) -> Result<&mut Table, SchemaError> {
        self.schema
            .table_mut(id)
            .ok_or_else(|| SchemaError::malformed(format!("unknown {}", id)))
    }

    /// Add one inherited key column per primary key column of `target` to
    /// the primary key of `table`, each marked as a foreign key. Returns the
    /// matching edges.
    pub(super) fn inherit_key(
        &self,
        table: &mut Table,
        target: &str,
    ) -> Result<Vec<ForeignKeyEdge>, SchemaError> {
        let mut edges = Vec::new();
        for pk in self.primary_key_of(target)? {
            let column = self.naming.qualify(target, &pk);
            table.push_key_column(&column)?;
            table.mark_foreign_key(&column);
            edges.push(ForeignKeyEdge::new(&table.name, column, target, pk));
        }
        Ok(edges)
    }
}

/// Find the single identifying relationship of a weak entity and its owner
fn identifying_owner<'m>(
    kinds: &[(&'m Relationship, RelationshipKind<'m>)],
    weak_entity: &str,
) -> Result<(&'m Relationship, &'m str), SchemaError> {
    let mut found = kinds.iter().filter_map(|(relationship, kind)| match *kind {
        RelationshipKind::Identifying { owner, weak } if weak == weak_entity => {
            Some((*relationship, owner))
        }
        _ => None,
    });

    match (found.next(), found.next()) {
        (Some(hit), None) => Ok(hit),
        (None, _) => Err(SchemaError::malformed(format!(
            "missing identifying relationship for weak entity '{}'",
            weak_entity
        ))),
        (Some(_), Some(_)) => Err(SchemaError::malformed(format!(
            "weak entity '{}' has more than one identifying relationship",
            weak_entity
        ))),
    }
}

/// Map an ER model with default naming
pub fn map_model(model: &ErModel) -> Result<RelationalSchema, SchemaError> {
    TableBuilder::new(model).build()
}
