//! # API Error Type
//!
//! Unified error type for order-entry commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Khata Order Entry                      │
//! │                                                                         │
//! │  Caller (front-end bridge / CLI)        Rust                            │
//! │  ───────────────────────────────        ────                            │
//! │                                                                         │
//! │  add_line(code, qty, rate)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog file unreadable? ─── io / serde_json ───┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Core Error? ─── CoreError::ItemNotFound ──── ApiError ─────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller always receives a machine-readable `code` and a message it
//! can show as-is.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use khata_core::{CoreError, ValidationError};

/// Error returned from order-entry commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "customer is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item, customer or line does not exist
    NotFound,

    /// Input validation failed; nothing was changed
    ValidationError,

    /// Order composition failed (line limit, no line being edited)
    OrderError,

    /// Configuration or catalog file could not be loaded
    ConfigError,

    /// Unexpected failure
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::OrderError => "ORDER_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
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

    pub fn order(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::OrderError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Catalog file could not be read.
    pub fn catalog_io(path: &Path, err: std::io::Error) -> Self {
        tracing::error!(path = %path.display(), error = %err, "Failed to read catalog");
        ApiError::config(format!("Cannot read catalog {}: {}", path.display(), err))
    }

    /// Catalog file is not valid catalog JSON.
    pub fn catalog_format(err: serde_json::Error) -> Self {
        tracing::error!(error = %err, "Failed to parse catalog");
        ApiError::config(format!("Invalid catalog file: {}", err))
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(code) => ApiError::not_found("Item", &code),
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", &id),
            err @ CoreError::LineOutOfRange { .. } => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            err @ CoreError::OrderTooLarge { .. } => ApiError::order(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Output serialization failed (only reachable through a bug).
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!(error = %err, "JSON serialization failed");
        ApiError::internal("Failed to serialize response")
    }
}
