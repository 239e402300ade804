use std::fmt;

use apollo_compiler::Schema;
use apollo_compiler::validation::WithErrors;
use serde::Serialize;

/// Errors produced while composing subgraphs into a supergraph.
///
/// The variant name doubles as the stable error code, see [`CompositionError::code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CompositionError {
    #[error("A subgraph named {name} already exists")]
    DuplicateSubgraphName { name: String },
    #[error("{message}")]
    InvalidSubgraphName { message: String },
    #[error("[{subgraph}] {message}")]
    InvalidGraphql { subgraph: String, message: String },
    #[error("{message}")]
    TypeKindMismatch { message: String },
    #[error("{message}")]
    FieldTypeMismatch { message: String },
    #[error("{message}")]
    FieldArgumentTypeMismatch { message: String },
    #[error("{message}")]
    FieldArgumentDefaultMismatch { message: String },
    #[error("{message}")]
    RequiredArgumentMissingInSomeSubgraph { message: String },
    #[error("{message}")]
    RequiredInputFieldMissingInSomeSubgraph { message: String },
    #[error("{message}")]
    EmptyMergedInputType { message: String },
}

impl CompositionError {
    /// Machine-readable code, e.g. `FIELD_ARGUMENT_TYPE_MISMATCH`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub(crate) fn from_parse_errors(subgraph: &str, errors: WithErrors<Schema>) -> Self {
        Self::InvalidGraphql {
            subgraph: subgraph.to_owned(),
            message: errors.errors.to_string(),
        }
    }
}

/// The serialized form of a [`CompositionError`]: `{ "message": ..., "code": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOutput {
    pub message: String,
    pub code: &'static str,
}

impl From<&CompositionError> for ErrorOutput {
    fn from(error: &CompositionError) -> Self {
        Self {
            message: error.to_string(),
            code: error.code(),
        }
    }
}

impl fmt::Display for ErrorOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
