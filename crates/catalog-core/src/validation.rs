//! # Validation Module
//!
//! Input validation utilities for the product catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mapping deserialization                                      │
//! │  ├── Key presence, JSON types                                          │
//! │  └── THIS MODULE: field extractors                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository writes (create / update)                          │
//! │  └── THIS MODULE: validate_product                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK constraints (category, name)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::validate_product_name;
//!
//! assert!(validate_product_name("Fedora").is_ok());
//! assert!(validate_product_name("   ").is_err());
//! ```

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::Product;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a whole product before it is written to the store.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)
}

// =============================================================================
// Mapping Field Extractors
// =============================================================================

/// Returns the value stored under `field`, or a missing-attribute error.
///
/// An explicit `null` counts as missing.
pub fn require_field<'a>(data: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a Value> {
    match data.get(field) {
        Some(Value::Null) | None => Err(ValidationError::Required {
            field: field.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

/// Returns the text stored under `field`.
pub fn require_text<'a>(data: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    require_field(data, field)?
        .as_str()
        .ok_or_else(|| ValidationError::InvalidType {
            field: field.to_string(),
            expected: "text".to_string(),
        })
}

/// Returns the boolean stored under `field`.
///
/// Only a genuine JSON boolean is accepted: `1`, `23` or `"true"` are
/// rejected rather than coerced.
pub fn require_bool(data: &Map<String, Value>, field: &str) -> ValidationResult<bool> {
    require_field(data, field)?
        .as_bool()
        .ok_or_else(|| ValidationError::InvalidType {
            field: field.to_string(),
            expected: "boolean".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
