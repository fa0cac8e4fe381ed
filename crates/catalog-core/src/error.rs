//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - Invalid-state and domain errors                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product has never been persisted.
    ///
    /// ## When This Occurs
    /// - Calling update/delete on a product whose `id` is `None`
    /// - The caller should have used create instead
    #[error("{operation} called on a product with no id")]
    MissingIdentifier { operation: String },

    /// The product carries an identifier the store can never hand out.
    ///
    /// ## When This Occurs
    /// - `id` is `Some(0)`, e.g. a zeroed or corrupted record
    #[error("{operation} called with invalid id {id}")]
    InvalidIdentifier { operation: String, id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether this is one of the invalid-state (identifier) errors.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            CoreError::MissingIdentifier { .. } | CoreError::InvalidIdentifier { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while deserializing a mapping into a product, while parsing a
/// price, and before a product is written to the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The mapping itself is absent or is not an object.
    #[error("Invalid product: body of request contained bad or no data")]
    NoData,

    /// A required field is missing or empty.
    #[error("Invalid product: missing {field}")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field holds a value of the wrong JSON type.
    #[error("Invalid type for {expected} [{field}]")]
    InvalidType { field: String, expected: String },

    /// Invalid format (e.g., a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} '{value}' must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// The field the error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::NoData => None,
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => Some(field),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
