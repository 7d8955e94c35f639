//! # API Error Type
//!
//! The one error shape the operator sees.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in tally                                  │
//! │                                                                         │
//! │  Command handler: Result<Value, ApiError>                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ServiceError ─┬─ CoreError ──┐                                         │
//! │                └─ DbError ────┴──► ApiError ──► stderr (JSON), exit 1   │
//! │                                                                         │
//! │  Success ─────────────────────────► stdout (JSON), exit 0               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "INSUFFICIENT_STOCK",
//!   "message": "Insufficient stock for P101: 2 available, 5 requested"
//! }
//! ```

use serde::Serialize;
use tally_core::{CoreError, ValidationError};
use tally_db::DbError;
use tally_service::ServiceError;

/// Error printed when a command fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or transaction id
    NotFound,

    /// Input failed a field rule
    ValidationError,

    /// Product id already in the catalog
    DuplicateId,

    /// Sale asks for more than is on the shelf
    InsufficientStock,

    /// Sale line quantity is zero or negative
    InvalidQuantity,

    /// Restock amount is zero or negative
    InvalidAmount,

    /// Sale with no lines
    EmptySale,

    /// Session lacks the required role
    Unauthorized,

    /// A store file could not be written or encoded
    StorageError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::Duplicate { entity, id } => ApiError::new(
                ErrorCode::DuplicateId,
                format!("{} '{}' already exists", entity, id),
            ),
            DbError::Io { path, source } => {
                tracing::error!(path = %path.display(), error = %source, "Store write failed");
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Could not write {}: {}", path.display(), source),
                )
            }
            DbError::Serialization(e) => {
                tracing::error!("Store encoding failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Could not encode store file")
            }
            DbError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product_id, available, requested
                ),
            ),
            e @ CoreError::InvalidQuantity { .. } => {
                ApiError::new(ErrorCode::InvalidQuantity, e.to_string())
            }
            e @ CoreError::InvalidAmount(_) => ApiError::new(ErrorCode::InvalidAmount, e.to_string()),
            e @ CoreError::EmptySale => ApiError::new(ErrorCode::EmptySale, e.to_string()),
            e @ CoreError::AuthorizationDenied { .. } => {
                ApiError::new(ErrorCode::Unauthorized, e.to_string())
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => ApiError::from(e),
            ServiceError::Db(e) => ApiError::from(e),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
