//! # Validation Module
//!
//! Input validation for the customer form, catalog search and order
//! submission.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (TypeScript)                                       │
//! │  └── Keyboard types, immediate feedback                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths                                          │
//! │  ├── PIN code and GSTIN format                                         │
//! │  └── Order ready for submission (customer + lines)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Billing backend                                              │
//! │  └── Authoritative checks (duplicates, credit limits, ...)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric order inputs (quantity, rate, value) are deliberately NOT
//! validated here: they are coerced by the line calculator.

use crate::error::ValidationError;
use crate::types::Customer;
use crate::{MAX_ORDER_LINES, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use khata_core::validation::validate_required_text;
///
/// assert_eq!(validate_required_text("name", "  Sharma Traders ", 100).unwrap(), "Sharma Traders");
/// assert!(validate_required_text("name", "   ", 100).is_err());
/// ```
pub fn validate_required_text(field: &str, text: &str, max: usize) -> ValidationResult<String> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_optional_text(field, text, max)
}

/// Validates an optional text field and returns it trimmed (possibly empty).
pub fn validate_optional_text(field: &str, text: &str, max: usize) -> ValidationResult<String> {
    let text = text.trim();

    if text.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(text.to_string())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    validate_optional_text("query", query, MAX_SEARCH_QUERY_LEN)
}

/// Validates an Indian postal (PIN) code: six digits, not starting with 0.
///
/// ```rust
/// use khata_core::validation::validate_postal_code;
///
/// assert!(validate_postal_code("400001").is_ok());
/// assert!(validate_postal_code("040001").is_err());
/// assert!(validate_postal_code("4000").is_err());
/// ```
pub fn validate_postal_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();
    let well_formed = code.len() == 6
        && code.bytes().all(|b| b.is_ascii_digit())
        && !code.starts_with('0');

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "postalCode".to_string(),
            reason: "must be a 6-digit PIN code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// GSTIN
// =============================================================================

const GSTIN_CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Validates a GST identification number.
///
/// ## Layout
/// ```text
///  27  AAPFU0939F  1  Z  V
///  ──  ──────────  ─  ─  ─
///  │   │           │  │  └─ check character (mod-36 checksum)
///  │   │           │  └──── always 'Z'
///  │   │           └─────── registration number within the PAN (1-9, A-Z)
///  │   └─────────────────── PAN: 5 letters, 4 digits, 1 letter
///  └─────────────────────── state code
/// ```
///
/// Only the structure and checksum are checked; whether the registration
/// is active is the backend's business.
///
/// ```rust
/// use khata_core::validation::validate_gstin;
///
/// assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());
/// assert!(validate_gstin("27AAPFU0939F1ZA").is_err()); // wrong check character
/// ```
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let gstin = gstin.trim().to_ascii_uppercase();
    let bytes = gstin.as_bytes();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "gstNo".to_string(),
        reason: reason.to_string(),
    };

    if bytes.len() != 15 {
        return Err(invalid("must be 15 characters"));
    }

    let state_ok = bytes[..2].iter().all(u8::is_ascii_digit);
    let pan_ok = bytes[2..7].iter().all(u8::is_ascii_uppercase)
        && bytes[7..11].iter().all(u8::is_ascii_digit)
        && bytes[11].is_ascii_uppercase();
    let entity_ok = bytes[12].is_ascii_uppercase() || (b'1'..=b'9').contains(&bytes[12]);

    if !state_ok || !pan_ok || !entity_ok || bytes[13] != b'Z' {
        return Err(invalid("does not match the GSTIN layout"));
    }

    if gstin_check_char(&bytes[..14]) != Some(bytes[14]) {
        return Err(invalid("check character does not match"));
    }

    Ok(())
}

/// Computes the GSTIN check character over the first 14 characters.
fn gstin_check_char(body: &[u8]) -> Option<u8> {
    let mut sum = 0usize;
    for (i, c) in body.iter().enumerate() {
        let value = GSTIN_CHARSET.iter().position(|x| x == c)?;
        let product = value * if i % 2 == 0 { 1 } else { 2 };
        sum += product / 36 + product % 36;
    }
    Some(GSTIN_CHARSET[(36 - sum % 36) % 36])
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates that another line can be added to an order.
///
/// ## Rules
/// - Must not exceed MAX_ORDER_LINES (200)
pub fn validate_line_count(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_ORDER_LINES {
        return Err(ValidationError::TooLong {
            field: "order lines".to_string(),
            max: MAX_ORDER_LINES,
        });
    }

    Ok(())
}

/// Validates that an order can be submitted.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Tap "Create"                                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_order_ready ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── no customer? → "customer is required"                         │
/// │       │                                                                 │
/// │       ├── no lines?    → "items is required"                            │
/// │       │                                                                 │
/// │       └── OK → build the order request                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_order_ready(customer: Option<&Customer>, line_count: usize) -> ValidationResult<()> {
    if customer.is_none() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    if line_count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
