//! # Error Types
//!
//! Domain-specific error types for khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  khata-core errors (this file)                                         │
//! │  ├── CoreError        - Order composition failures                     │
//! │  └── ValidationError  - Form / submission validation failures          │
//! │                                                                         │
//! │  order-entry app                                                       │
//! │  └── ApiError         - What the front-end sees (code + message)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front-end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails: bad numeric text is coerced, and a zero
//! quantity leaves the rate alone. Errors only come from composing and
//! submitting an order, and from the customer registration form.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Order composition errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item code is not in the loaded catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Customer id is not in the loaded customer list.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Removing a line by a position the order does not have.
    ///
    /// ## When This Occurs
    /// - The front-end holds a stale line list after another removal
    /// - Off-by-one between a 1-based display number and a 0-based position
    #[error("Line {position} does not exist (order has {len} lines)")]
    LineOutOfRange { position: usize, len: usize },

    /// Order has reached the maximum number of lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Shown to the user as a blocking message; nothing is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., postal code, GSTIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Field name does not exist on the form.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineOutOfRange {
            position: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "Line 4 does not exist (order has 2 lines)");

        let err = CoreError::ItemNotFound("CEM-50".to_string());
        assert_eq!(err.to_string(), "Item not found: CEM-50");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer".to_string(),
        };
        assert_eq!(err.to_string(), "customer is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "name must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "customer".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
