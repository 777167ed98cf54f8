//! ER-to-relational mapping.
//!
//! This module provides:
//! - Primary key resolution with composite key expansion
//! - Strong entity tables and multivalued attribute child tables
//! - Weak entity tables keyed by their owner's key plus partial key
//! - Foreign keys for N:1 relationships, junction tables for N:N and 1:1
//!
//! The mapping is a pure function of the model: iteration follows declaration
//! order everywhere, so identical input yields identical output.

mod builder;
mod entity;
mod keys;
mod kind;
mod relationship;

pub use builder::{map_model, TableBuilder};
pub use keys::resolve_primary_key;
pub use kind::{check_entities, classify, RelationshipKind};
