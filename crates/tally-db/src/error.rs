//! # Storage Error Types
//!
//! Error types for catalog and transaction log operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / ValidationError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds the file path or entity id               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (tally-service) ← Passed through unchanged               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (CLI) ← Serialized for the operator                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read failures never surface here: an unreadable file loads as empty.
//! Only writes fail.

use std::path::PathBuf;
use tally_core::ValidationError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in its store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Id already taken.
    ///
    /// ## When This Occurs
    /// - Adding a product whose id is in the catalog
    /// - Appending a transaction under an id already in the log
    #[error("Duplicate {entity} id: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// A store file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record was refused before it reached the file.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error for a given entity type and ID.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DbError::not_found("Product", "P404").to_string(),
            "Product not found: P404"
        );
        assert_eq!(
            DbError::duplicate("Product", "P101").to_string(),
            "Duplicate Product id: 'P101' already exists"
        );

        let err = DbError::io(
            "/ro/products.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write /ro/products.json: denied");
    }
}
