//! # Service Error Type
//!
//! Unified error type for inventory and checkout operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till                                   │
//! │                                                                         │
//! │  InventoryManager / Checkout                                           │
//! │  Result<T, PosError>                                                   │
//! │         │                                                               │
//! │         ├── ValidationError ──► CoreError::Validation ──┐             │
//! │         ├── CoreError (stock, payment) ─────────────────┤             │
//! │         ├── DbError::NotFound ──► PosError::NotFound ───┼─► PosError  │
//! │         └── DbError (anything else) ──► Storage ────────┘             │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │  ErrorResponse { code: "OUT_OF_STOCK", message: "Soda is out of stock" }│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure leaves data in its prior state; nothing is retried here.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use ts_rs::TS;

use till_core::{CoreError, ValidationError};
use till_db::DbError;

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum PosError {
    /// A business rule or input validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The store could not complete the operation.
    #[error("Storage error: {0}")]
    Storage(DbError),

    /// The configuration file could not be read or parsed.
    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl PosError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        PosError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Machine-readable category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PosError::Core(core) => match core {
                CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
                CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                CoreError::InvalidPayment { .. } => ErrorCode::InvalidPayment,
                CoreError::InsufficientPayment { .. } => ErrorCode::InsufficientPayment,
                CoreError::EmptyCart | CoreError::TotalOverflow | CoreError::Validation(_) => {
                    ErrorCode::ValidationError
                }
            },
            PosError::NotFound { .. } => ErrorCode::NotFound,
            PosError::Storage(_) => ErrorCode::StorageError,
            PosError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Whether the caller can fix this by changing its input.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, PosError::Storage(_) | PosError::Config { .. })
    }
}

/// Converts database errors; NotFound keeps its meaning.
impl From<DbError> for PosError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => PosError::NotFound { entity, id },
            other => PosError::Storage(other),
        }
    }
}

impl From<ValidationError> for PosError {
    fn from(err: ValidationError) -> Self {
        PosError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type PosResult<T> = Result<T, PosError>;

// =============================================================================
// Boundary Representation
// =============================================================================

/// Error codes for the presentation layer.
///
/// ## Usage in Frontend
/// ```typescript
/// switch (e.code) {
///   case 'OUT_OF_STOCK':
///     flashProduct(id);
///     break;
///   case 'INSUFFICIENT_PAYMENT':
///     highlightPaymentField();
///     break;
///   default:
///     showError(e.message);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Record not found
    NotFound,

    /// A stock decrement would go below zero
    InsufficientStock,

    /// Product has no stock to add to the cart
    OutOfStock,

    /// Payment text is not a usable amount
    InvalidPayment,

    /// Payment does not cover the total
    InsufficientPayment,

    /// Database operation failed
    StorageError,

    /// Config file unreadable or malformed
    ConfigError,
}

/// What the presentation layer receives when an operation fails.
///
/// ```json
/// {
///   "code": "INSUFFICIENT_PAYMENT",
///   "message": "Insufficient payment: total $3.00, tendered $2.00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorResponse {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl From<&PosError> for ErrorResponse {
    fn from(err: &PosError) -> Self {
        let message = match err {
            PosError::Storage(db_err) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %db_err, "Storage operation failed");
                "Storage operation failed".to_string()
            }
            other => other.to_string(),
        };

        ErrorResponse {
            code: err.code(),
            message,
        }
    }
}

impl From<PosError> for ErrorResponse {
    fn from(err: PosError) -> Self {
        ErrorResponse::from(&err)
    }
}
