//! # Price Module
//!
//! Parsing and canonical storage form for product prices.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Exact-match price lookups would miss rows whose price went through    │
//! │  a float on the way in.                                                 │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                            │
//! │    "12.50", "12.5" and 12.5 all parse to the same base-10 value        │
//! │    and compare equal.                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical Form
//! The store keeps prices as normalized text (`12.50` → `"12.5"`), so an
//! equality filter in SQL compares values rather than spellings.
//!
//! ## Usage
//! ```rust
//! use catalog_core::price::{canonical, parse_price};
//! use rust_decimal::Decimal;
//!
//! let price = parse_price(" \"12.50\" ").unwrap();
//! assert_eq!(price, Decimal::new(125, 1));
//! assert_eq!(canonical(&price), "12.5");
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

const FIELD: &str = "price";

/// Parses a textual price into a decimal.
///
/// ## Rules
/// - Leading and trailing whitespace and quotes (`"` or `'`) are ignored,
///   paired or not
/// - Plain (`12.50`) and scientific (`1.25e1`) notation are accepted
/// - Anything else is an `InvalidFormat` error
pub fn parse_price(text: &str) -> ValidationResult<Decimal> {
    let cleaned = text.trim_matches(is_debris);

    if cleaned.is_empty() {
        return Err(ValidationError::Required {
            field: FIELD.to_string(),
        });
    }

    if let Ok(price) = Decimal::from_str(cleaned) {
        return Ok(price);
    }

    if cleaned.contains(['e', 'E']) {
        if let Ok(price) = Decimal::from_scientific(cleaned) {
            return Ok(price);
        }
    }

    Err(ValidationError::InvalidFormat {
        field: FIELD.to_string(),
        reason: format!("'{cleaned}' is not a decimal number"),
    })
}

/// Parses a price out of a mapping value (text or JSON number).
pub fn parse_price_value(value: &Value) -> ValidationResult<Decimal> {
    match value {
        Value::String(text) => parse_price(text),
        Value::Number(number) => parse_price(&number.to_string()),
        other => Err(ValidationError::InvalidFormat {
            field: FIELD.to_string(),
            reason: format!("expected text or number, got {other}"),
        }),
    }
}

/// Returns the canonical storage form of a price.
///
/// Two prices that compare equal always produce the same text.
pub fn canonical(price: &Decimal) -> String {
    price.normalize().to_string()
}

fn is_debris(c: char) -> bool {
    c.is_whitespace() || c == '"' || c == '\''
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_price("12.50").unwrap(), dec!(12.50));
        assert_eq!(parse_price("250").unwrap(), dec!(250));
        assert_eq!(parse_price("-3.10").unwrap(), dec!(-3.1));
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_quotes() {
        assert_eq!(parse_price("  12.50\n").unwrap(), dec!(12.5));
        assert_eq!(parse_price("\"12.50\"").unwrap(), dec!(12.5));
        assert_eq!(parse_price(" '12.50' ").unwrap(), dec!(12.5));
        assert_eq!(parse_price("12.50\"").unwrap(), dec!(12.5));
        assert_eq!(parse_price("\"12.50").unwrap(), dec!(12.5));
        assert_eq!(parse_price("\"\"12.50\"\"").unwrap(), dec!(12.5));
        assert_eq!(parse_price("\" 12.50' ").unwrap(), dec!(12.5));
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_price("1.25e1").unwrap(), dec!(12.5));
    }

    #[test]
    fn test_parse_rejects_words() {
        let err = parse_price("Fifty Cents").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        assert_eq!(err.field(), Some("price"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_price("  \"\" "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_price_value(&json!(250)).unwrap(), dec!(250));
        assert_eq!(parse_price_value(&json!(12.5)).unwrap(), dec!(12.50));
        assert_eq!(parse_price_value(&json!("12.50")).unwrap(), dec!(12.5));
        assert!(parse_price_value(&json!(true)).is_err());
        assert!(parse_price_value(&json!(null)).is_err());
    }

    #[test]
    fn test_canonical_is_value_based() {
        assert_eq!(canonical(&dec!(12.50)), "12.5");
        assert_eq!(canonical(&dec!(12.5)), canonical(&dec!(12.500)));
        assert_eq!(canonical(&dec!(250)), "250");
        assert_eq!(canonical(&dec!(0.00)), "0");
    }
}
