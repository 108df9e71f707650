//! # Error Types
//!
//! Domain-specific error types for describo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  describo-core errors (this file)                                      │
//! │  ├── CoreError        - Not-found and state-transition errors          │
//! │  └── ValidationError  - Form input failures (before any network call)  │
//! │                                                                         │
//! │  describo-state errors (separate crate)                                │
//! │  ├── ServiceError     - Remote boundary failures                       │
//! │  └── StorageError     - Durable key/value storage failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → manager `last_error` → UI         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Managers never hand these errors to the UI as a raised fault; they render
//! them with `to_string()` into their side-channel error field.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by lookups and local edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Store id is not in the collection.
    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// A profile field was changed without entering edit mode first.
    #[error("Profile is not being edited")]
    NotEditing,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements and are
/// reported before any remote call is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed URL or email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree don't (password confirmation).
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::StoreNotFound(3).to_string(), "Store not found: 3");
        assert_eq!(
            CoreError::ProductNotFound(12).to_string(),
            "Product not found: 12"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");

        let err = ValidationError::Mismatch {
            field: "password confirmation".to_string(),
            other: "password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "password confirmation does not match password"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.clone().into();
        assert_eq!(core_err, CoreError::Validation(validation_err));
        // Wrapped validation errors render without a prefix so forms can show them as-is.
        assert_eq!(core_err.to_string(), "name is required");
    }
}
