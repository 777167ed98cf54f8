//! Entity pass: strong entities, multivalued attribute tables, weak entities.

use super::builder::TableBuilder;
use super::keys::resolve_primary_key;
use crate::error::SchemaError;
use crate::model::{Attribute, Entity, Relationship};
use crate::schema::{ForeignKeyEdge, Table};

impl TableBuilder<'_> {
    /// Map a strong entity to its table plus one child table per multivalued
    /// attribute. The parent is registered before its children.
    pub(super) fn map_strong_entity(&mut self, entity: &Entity) -> Result<(), SchemaError> {
        let primary_key = resolve_primary_key(entity)?;

        let mut table = Table::new(&entity.name);
        for column in &primary_key {
            table.push_key_column(column)?;
        }

        let mut multivalued = Vec::new();
        for attribute in entity.attributes.iter().filter(|a| !a.is_primary_key) {
            if attribute.is_multi_valued {
                multivalued.push(attribute);
                continue;
            }
            for column in attribute.columns() {
                if table.is_pk_column(column) {
                    return Err(SchemaError::ambiguous_key(
                        &entity.name,
                        format!("column '{}' collides with a primary key column", column),
                    ));
                }
                table.push_column(column);
            }
        }

        self.schema.add_table(table)?;

        for attribute in multivalued {
            let (child, edges) = self.multivalued_table(entity, attribute)?;
            self.schema.add_table(child)?;
            for edge in edges {
                self.schema.add_foreign_key(edge);
            }
        }

        Ok(())
    }

    /// Child table `{entity}_{attribute}`: inherited parent key followed by the
    /// attribute's own column(s), all of it forming the primary key
    fn multivalued_table(
        &self,
        entity: &Entity,
        attribute: &Attribute,
    ) -> Result<(Table, Vec<ForeignKeyEdge>), SchemaError> {
        let mut child = Table::new(self.naming.qualify(&entity.name, &attribute.name));
        let edges = self.inherit_key(&mut child, &entity.name)?;
        for column in attribute.columns() {
            child.push_key_column(column)?;
        }
        Ok((child, edges))
    }

    /// Map a weak entity. Its key is the owner's key (as foreign key columns)
    /// followed by its own partial key columns.
    pub(super) fn map_weak_entity(
        &mut self,
        entity: &Entity,
        owner: &str,
        identifying: &Relationship,
    ) -> Result<(), SchemaError> {
        let mut table = Table::new(&entity.name);
        let edges = self.inherit_key(&mut table, owner)?;

        for attribute in entity.attributes.iter().filter(|a| a.is_partial_key) {
            for column in attribute.columns() {
                table.push_key_column(column)?;
            }
        }

        let plain = entity
            .attributes
            .iter()
            .filter(|a| !a.is_partial_key)
            .chain(&identifying.attributes);
        for attribute in plain {
            for column in attribute.columns() {
                table.push_column(column);
            }
        }

        self.schema.add_table(table)?;
        for edge in edges {
            self.schema.add_foreign_key(edge);
        }

        Ok(())
    }
}
