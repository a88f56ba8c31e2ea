//! Error types for the travel planning core.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::ResourceKind;

/// Every failure the core can report to its caller.
///
/// `NotFound` and `Unauthorized` are kept apart on purpose: callers map them
/// to different user-visible outcomes.
#[derive(Error, Debug)]
pub enum TravelError {
    /// Malformed or missing input. Never retried.
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// The target resource does not exist.
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: ResourceKind, id: String },

    /// The resource exists but the caller may not act on it.
    #[error("Not authorized to access {} {id}", .kind.as_str())]
    Unauthorized { kind: ResourceKind, id: String },

    /// A unique key was violated.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Underlying SQLite failure.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// JSON payload could not be encoded or decoded.
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),

    /// Configuration and runtime wiring errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The request deadline elapsed; nothing was committed.
    #[error("Operation timed out after {after:?}")]
    Timeout { after: Duration },

    /// The caller exceeded the per-instance request budget.
    #[error("Too many requests for '{key}', try again later")]
    RateLimited { key: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TravelError {
        TravelError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TravelError {
        TravelError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TravelError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn unauthorized(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::Unauthorized {
            kind,
            id: id.into(),
        }
    }

    /// True for failures caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::Unauthorized { .. }
                | Self::Conflict { .. }
                | Self::RateLimited { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| {
            if is_unique_violation(&e) {
                TravelError::Conflict {
                    message: format!("{message}: {e}"),
                }
            } else {
                TravelError::database(message).with_source(e)
            }
        })
    }
}

fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Result type alias for travel core operations
pub type Result<T> = std::result::Result<T, TravelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_builder() {
        let err = TravelError::validation("priority").with_reason("must be between 1 and 5");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'priority': must be between 1 and 5"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_not_found_and_unauthorized_are_distinct() {
        let missing = TravelError::not_found(ResourceKind::Plan, "p1");
        let denied = TravelError::unauthorized(ResourceKind::Plan, "p1");
        assert!(matches!(missing, TravelError::NotFound { .. }));
        assert!(matches!(denied, TravelError::Unauthorized { .. }));
        assert_ne!(missing.to_string(), denied.to_string());
    }

    #[test]
    fn test_messages_name_the_resource_kind() {
        assert_eq!(
            TravelError::not_found(ResourceKind::TravelItem, "i1").to_string(),
            "Travel item with ID i1 not found"
        );
        assert_eq!(
            TravelError::unauthorized(ResourceKind::Plan, "p1").to_string(),
            "Not authorized to access plan p1"
        );
    }

    #[test]
    fn test_db_context_maps_unique_violation_to_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (k TEXT PRIMARY KEY); INSERT INTO t VALUES ('a');")
            .unwrap();
        let result = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .db_context("Failed to insert");
        assert!(matches!(result, Err(TravelError::Conflict { .. })));
    }

    #[test]
    fn test_db_context_keeps_other_errors_as_database() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result = conn
            .execute("INSERT INTO missing_table VALUES (1)", [])
            .db_context("Failed to insert");
        match result {
            Err(TravelError::Database { message, .. }) => assert_eq!(message, "Failed to insert"),
            other => panic!("Expected database error, got {other:?}"),
        }
    }
}
