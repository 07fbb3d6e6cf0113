//! Error types for schema-graph operations.
//!
//! Every failure surfaced by the engine carries one of four kinds so the
//! boundary layer can map it to a response without inspecting payloads.

use crate::storage::StorageError;

/// Main error type for schema-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The caller supplied malformed input (selector cardinality, non-object root, ...)
    #[error("Bad input: {message}")]
    BadInput { message: String },

    /// A named node is absent, or a query produced nothing
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A rename target is already taken
    #[error("Conflict: {kind} '{name}' already exists")]
    Conflict { kind: String, name: String },

    /// The backing graph store failed
    #[error("Graph store failure: {0}")]
    Upstream(#[source] StorageError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadInput,
    NotFound,
    Conflict,
    UpstreamFailure,
}

impl SchemaError {
    /// Create a bad-input error.
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error.
    pub fn conflict(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Conflict {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// The kind of this error.
    ///
    /// Malformed JSON handed to the engine is reported as bad input.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::BadInput { .. } | SchemaError::Json(_) => ErrorKind::BadInput,
            SchemaError::NotFound { .. } => ErrorKind::NotFound,
            SchemaError::Conflict { .. } => ErrorKind::Conflict,
            SchemaError::Upstream(_) => ErrorKind::UpstreamFailure,
        }
    }
}

impl From<StorageError> for SchemaError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { kind, name } => {
                SchemaError::not_found(format!("{} '{}'", kind, name))
            }
            StorageError::AlreadyExists { kind, name } => SchemaError::Conflict { kind, name },
            other => SchemaError::Upstream(other),
        }
    }
}

/// Result type for schema-graph operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
