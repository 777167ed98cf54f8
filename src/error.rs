//! Error taxonomy for the ER-to-relational mapping.
//!
//! Every error aborts the run: the builder never hands out a partial schema.

use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SchemaError {
    /// Required structure is missing or contradicts the ER model rules
    #[error("malformed model: {0}")]
    MalformedModel(String),

    /// A table's key cannot be determined unambiguously
    #[error("ambiguous key in '{table}': {reason}")]
    AmbiguousKey { table: String, reason: String },

    /// A participant cardinality outside {"1", "N"}
    #[error(
        "unsupported cardinality '{value}' for '{entity}' in relationship '{relationship}' (expected \"1\" or \"N\")"
    )]
    UnsupportedCardinality {
        relationship: String,
        entity: String,
        value: String,
    },
}

impl SchemaError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SchemaError::MalformedModel(message.into())
    }

    pub(crate) fn ambiguous_key(table: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::AmbiguousKey {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Short, stable name of the error kind (used in CLI summaries)
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaError::MalformedModel(_) => "MalformedModelError",
            SchemaError::AmbiguousKey { .. } => "AmbiguousKeyError",
            SchemaError::UnsupportedCardinality { .. } => "UnsupportedCardinalityError",
        }
    }
}
