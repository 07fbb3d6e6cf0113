//! Storage-specific error types for graph persistence.
//!
//! These errors describe failures of the backing graph store and know nothing
//! about validation or naming semantics. The engine maps them onto
//! [`SchemaError`](crate::error::SchemaError) kinds.

use std::fmt;
use std::time::Duration;

/// Errors that can occur during graph store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The named node (or analytics key) does not exist.
    NotFound { kind: String, name: String },

    /// The target name of a rename is already taken.
    AlreadyExists { kind: String, name: String },

    /// The backend could not be reached or refused the call.
    Unavailable { message: String },

    /// The call did not complete within the configured deadline.
    Timeout { operation: String, duration: Duration },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound { kind, name } => write!(f, "{} not found: {}", kind, name),
            StorageError::AlreadyExists { kind, name } => {
                write!(f, "{} already exists: {}", kind, name)
            }
            StorageError::Unavailable { message } => {
                write!(f, "Graph store unavailable: {}", message)
            }
            StorageError::Timeout {
                operation,
                duration,
            } => write!(f, "Graph store call '{}' timed out after {:?}", operation, duration),
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn already_exists(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// A rename target collided with an existing name.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::AlreadyExists { .. })
    }

    /// The same call may succeed if issued again later. The engine itself
    /// never retries.
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            StorageError::Unavailable { .. } | StorageError::Timeout { .. }
        )
    }
}
