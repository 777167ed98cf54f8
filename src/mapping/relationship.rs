//! Relationship pass: foreign keys on the many side, junction tables.

use super::builder::TableBuilder;
use crate::error::SchemaError;
use crate::model::Relationship;
use crate::schema::{ForeignKeyEdge, Table};

impl TableBuilder<'_> {
    /// N:1 / 1:N: the many side receives the one side's key as foreign key
    /// columns, followed by the relationship's attributes. No table is created.
    ///
    /// A key column already declared on the many side is reused, not repeated.
    pub(super) fn map_many_to_one(
        &mut self,
        relationship: &Relationship,
        many: &str,
        one: &str,
    ) -> Result<(), SchemaError> {
        let one_key = self.primary_key_of(one)?;
        let columns: Vec<(String, String)> = one_key
            .into_iter()
            .map(|pk| (self.naming.qualify(one, &pk), pk))
            .collect();

        let many_id = self.table_id(many)?;
        let table = self.table_mut(many_id)?;
        for (column, _) in &columns {
            table.push_column(column);
            table.mark_foreign_key(column);
        }
        for attribute in &relationship.attributes {
            for column in attribute.columns() {
                table.push_column(column);
            }
        }

        for (column, pk) in columns {
            self.schema
                .add_foreign_key(ForeignKeyEdge::new(many, column, one, pk));
        }

        Ok(())
    }

    /// N:N / 1:1: a junction table named after the relationship whose primary
    /// key is every participant's key, in declaration order
    pub(super) fn map_junction(&mut self, relationship: &Relationship) -> Result<(), SchemaError> {
        let mut table = Table::new(&relationship.name);
        let mut edges = Vec::new();

        for participant in &relationship.entities {
            edges.extend(self.inherit_key(&mut table, &participant.name)?);
        }

        for attribute in &relationship.attributes {
            for column in attribute.columns() {
                if table.is_pk_column(column) {
                    return Err(SchemaError::ambiguous_key(
                        &relationship.name,
                        format!("column '{}' collides with a primary key column", column),
                    ));
                }
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

#[cfg(test)]
mod tests {
    use crate::error::SchemaError;
    use crate::mapping::map_model;
    use crate::model::{Attribute, Entity, ErModel, ParticipantRef, Relationship};
    use crate::schema::ForeignKeyEdge;
    use pretty_assertions::assert_eq;

    fn company() -> ErModel {
        ErModel::new()
            .with_entity(
                Entity::new("Employee")
                    .with_attribute(Attribute::new("id").primary_key())
                    .with_attribute(Attribute::new("name")),
            )
            .with_entity(
                Entity::new("Department")
                    .with_attribute(Attribute::new("deptId").primary_key())
                    .with_attribute(Attribute::new("title")),
            )
    }

    #[test]
    fn test_many_to_one_adds_foreign_key() {
        let model = company().with_relationship(
            Relationship::binary(
                "WorksFor",
                ParticipantRef::new("Employee", "N"),
                ParticipantRef::new("Department", "1"),
            )
            .with_attribute(Attribute::new("since")),
        );
        let schema = map_model(&model).unwrap();

        assert_eq!(schema.len(), 2);
        let employee = schema.get_table("Employee").unwrap();
        assert_eq!(
            employee.columns,
            vec!["id", "name", "Department_deptId", "since"]
        );
        assert_eq!(employee.foreign_key_columns, vec!["Department_deptId"]);
        assert_eq!(
            schema.foreign_keys(),
            &[ForeignKeyEdge::new(
                "Employee",
                "Department_deptId",
                "Department",
                "deptId"
            )]
        );
    }

    #[test]
    fn test_many_to_one_composite_attribute() {
        let model = company().with_relationship(
            Relationship::binary(
                "WorksFor",
                ParticipantRef::new("Department", "1"),
                ParticipantRef::new("Employee", "N"),
            )
            .with_attribute(Attribute::new("Period").with_composite(["start", "end"])),
        );
        let schema = map_model(&model).unwrap();

        let employee = schema.get_table("Employee").unwrap();
        assert_eq!(
            employee.columns,
            vec!["id", "name", "Department_deptId", "start", "end"]
        );
        assert!(!employee.has_column("Period"));
        assert_eq!(employee.foreign_key_columns, vec!["Department_deptId"]);
        assert!(!schema.get_table("Department").unwrap().has_column("start"));
    }

    #[test]
    fn test_one_to_many_reversed_participants() {
        let model = company().with_relationship(Relationship::binary(
            "Manages",
            ParticipantRef::new("Department", "1"),
            ParticipantRef::new("Employee", "N"),
        ));
        let schema = map_model(&model).unwrap();

        assert!(schema
            .get_table("Employee")
            .unwrap()
            .is_fk_column("Department_deptId"));
        assert!(!schema.get_table("Department").unwrap().has_column("Employee_id"));
    }

    #[test]
    fn test_declared_foreign_key_column_is_reused() {
        let mut model = company().with_relationship(Relationship::binary(
            "WorksFor",
            ParticipantRef::new("Employee", "N"),
            ParticipantRef::new("Department", "1"),
        ));
        model.entities[0]
            .attributes
            .push(Attribute::new("Department_deptId"));

        let schema = map_model(&model).unwrap();
        let employee = schema.get_table("Employee").unwrap();
        assert_eq!(employee.columns, vec!["id", "name", "Department_deptId"]);
        assert_eq!(employee.foreign_key_columns, vec!["Department_deptId"]);
        assert_eq!(schema.foreign_keys().len(), 1);
    }

    #[test]
    fn test_self_referencing_many_to_one() {
        let model = company().with_relationship(Relationship::binary(
            "Supervises",
            ParticipantRef::new("Employee", "N"),
            ParticipantRef::new("Employee", "1"),
        ));
        let schema = map_model(&model).unwrap();

        assert_eq!(
            schema.foreign_keys(),
            &[ForeignKeyEdge::new("Employee", "Employee_id", "Employee", "id")]
        );
    }

    #[test]
    fn test_many_to_many_junction() {
        let model = company().with_relationship(
            Relationship::binary(
                "AssignedTo",
                ParticipantRef::new("Employee", "N"),
                ParticipantRef::new("Department", "N"),
            )
            .with_attribute(Attribute::new("Period").with_composite(["start", "end"])),
        );
        let schema = map_model(&model).unwrap();

        let junction = schema.get_table("AssignedTo").unwrap();
        assert_eq!(junction.primary_key, vec!["Employee_id", "Department_deptId"]);
        assert_eq!(
            junction.foreign_key_columns,
            vec!["Employee_id", "Department_deptId"]
        );
        assert_eq!(
            junction.columns,
            vec!["Employee_id", "Department_deptId", "start", "end"]
        );
        assert_eq!(schema.foreign_keys().len(), 2);
        assert_eq!(schema.foreign_keys()[0].to_table, "Employee");
        assert_eq!(schema.foreign_keys()[1].to_table, "Department");
    }

    #[test]
    fn test_one_to_one_uses_junction() {
        let model = company().with_relationship(Relationship::binary(
            "Heads",
            ParticipantRef::new("Employee", "1"),
            ParticipantRef::new("Department", "1"),
        ));
        let schema = map_model(&model).unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(
            schema.get_table("Heads").unwrap().primary_key,
            vec!["Employee_id", "Department_deptId"]
        );
        assert!(schema.get_table("Employee").unwrap().foreign_key_columns.is_empty());
    }

    #[test]
    fn test_self_referencing_junction_is_ambiguous() {
        let model = company().with_relationship(Relationship::binary(
            "Mentors",
            ParticipantRef::new("Employee", "N"),
            ParticipantRef::new("Employee", "N"),
        ));
        assert!(matches!(
            map_model(&model),
            Err(SchemaError::AmbiguousKey { .. })
        ));
    }

    #[test]
    fn test_junction_attribute_collides_with_key() {
        let model = company().with_relationship(
            Relationship::binary(
                "AssignedTo",
                ParticipantRef::new("Employee", "N"),
                ParticipantRef::new("Department", "N"),
            )
            .with_attribute(Attribute::new("Employee_id")),
        );
        let err = map_model(&model).unwrap_err();
        assert_eq!(
            err,
            SchemaError::AmbiguousKey {
                table: "AssignedTo".to_string(),
                reason: "column 'Employee_id' collides with a primary key column".to_string(),
            }
        );
        assert_eq!(err.kind(), "AmbiguousKeyError");
    }

    #[test]
    fn test_lowercase_cardinality_is_unsupported() {
        let model = company().with_relationship(Relationship::binary(
            "WorksFor",
            ParticipantRef::new("Employee", "n"),
            ParticipantRef::new("Department", "1"),
        ));
        assert_eq!(
            map_model(&model).unwrap_err(),
            SchemaError::UnsupportedCardinality {
                relationship: "WorksFor".to_string(),
                entity: "Employee".to_string(),
                value: "n".to_string(),
            }
        );

        let padded = company().with_relationship(Relationship::binary(
            "WorksFor",
            ParticipantRef::new("Employee", " N "),
            ParticipantRef::new("Department", "1 "),
        ));
        assert!(matches!(
            map_model(&padded),
            Err(SchemaError::UnsupportedCardinality { .. })
        ));
    }

    #[test]
    fn test_junction_name_collides_with_entity() {
        let model = company().with_relationship(Relationship::binary(
            "Employee",
            ParticipantRef::new("Employee", "N"),
            ParticipantRef::new("Department", "N"),
        ));
        let err = map_model(&model).unwrap_err();
        assert!(err.to_string().contains("duplicate table name 'Employee'"));
    }
}
