//! Map Entity-Relationship models to relational schemas.
//!
//! ```no_run
//! use er_relational::{map_model, ErModel};
//!
//! let model = ErModel::load(std::path::Path::new("university.json"))?;
//! let schema = map_model(&model)?;
//! println!("{}", schema.to_json_pretty()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod json_schema;
pub mod mapping;
pub mod model;
pub mod schema;

pub use error::SchemaError;
pub use mapping::{map_model, TableBuilder};
pub use model::{Attribute, Entity, ErModel, ParticipantRef, Relationship};
pub use schema::{ColumnRole, ForeignKeyEdge, RelationalSchema, Table};
