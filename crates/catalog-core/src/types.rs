//! # Domain Types
//!
//! Core domain types used throughout the product catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐              │
//! │  │      Product        │          │      Category       │              │
//! │  │  ─────────────────  │          │  ─────────────────  │              │
//! │  │  id (Option<i64>)   │  ──────► │  UNKNOWN (default)  │              │
//! │  │  name               │          │  CLOTHS             │              │
//! │  │  description        │          │  FOOD               │              │
//! │  │  price (Decimal)    │          │  HOUSEWARES         │              │
//! │  │  available          │          │  AUTOMOTIVE         │              │
//! │  │  category           │          │  TOOLS              │              │
//! │  └─────────────────────┘          └─────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` until the store assigns one. `Some(0)` is never handed
//! out by the store and is treated as an invalid identifier.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::price::parse_price_value;
use crate::validation::{
    require_bool, require_field, require_text, validate_product_name, ValidationResult,
};

// =============================================================================
// Category
// =============================================================================

/// Classification tag of a product.
///
/// The text form is the upper-case member name (`"CLOTHS"`). Parsing is
/// strict: lower-case or unknown names are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every member, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Returns the member name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                value: s.to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Store-assigned identifier; `None` before the first create.
    pub id: Option<i64>,

    /// Display name, never empty.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Exact decimal price.
    pub price: Decimal,

    /// Whether the product can currently be ordered.
    pub available: bool,

    /// Classification tag.
    pub category: Category,
}

impl Default for Product {
    fn default() -> Self {
        Product {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            available: true,
            category: Category::Unknown,
        }
    }
}

impl Product {
    /// Creates an unsaved product with every field supplied.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Product {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Returns the identifier of a persisted product.
    ///
    /// ## Errors
    /// * `MissingIdentifier` - `id` is `None` (use create instead)
    /// * `InvalidIdentifier` - `id` is `Some(0)`
    pub fn persisted_id(&self, operation: &str) -> CoreResult<i64> {
        match self.id {
            None => Err(CoreError::MissingIdentifier {
                operation: operation.to_string(),
            }),
            Some(0) => Err(CoreError::InvalidIdentifier {
                operation: operation.to_string(),
                id: 0,
            }),
            Some(id) => Ok(id),
        }
    }

    /// Converts the product into its mapping representation.
    ///
    /// Keys: `id`, `name`, `description`, `price` (decimal text),
    /// `available`, `category` (member name).
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.map_or(Value::Null, Value::from));
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        map.insert("description".to_string(), Value::from(self.description.as_str()));
        map.insert("price".to_string(), Value::from(self.price.to_string()));
        map.insert("available".to_string(), Value::from(self.available));
        map.insert("category".to_string(), Value::from(self.category.as_str()));
        map
    }

    /// Overwrites this product's fields from a mapping representation.
    ///
    /// `id` is not read. Every field is parsed before any is assigned, so
    /// on error the product is left as it was.
    ///
    /// ## Errors
    /// * `NoData` - `data` is null or not an object
    /// * `Required` - a key is missing, or `name` is blank
    /// * `InvalidType` - `available` is not a boolean, or a text field is not text
    /// * `InvalidFormat` - `price` is not a decimal number
    /// * `NotAllowed` - `category` is not a member name
    pub fn deserialize(&mut self, data: &Value) -> ValidationResult<&mut Self> {
        let data = data.as_object().ok_or(ValidationError::NoData)?;

        let name = require_text(data, "name")?;
        validate_product_name(name)?;
        let description = require_text(data, "description")?;
        let price = parse_price_value(require_field(data, "price")?)?;
        let available = require_bool(data, "available")?;
        let category = match require_field(data, "category")? {
            Value::String(text) => text.parse::<Category>()?,
            other => {
                return Err(ValidationError::NotAllowed {
                    field: "category".to_string(),
                    value: other.to_string(),
                    allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
                })
            }
        };

        self.name = name.to_string();
        self.description = description.to_string();
        self.price = price;
        self.available = available;
        self.category = category;
        Ok(self)
    }

    /// Builds a fresh, unsaved product from a mapping representation.
    pub fn from_value(data: &Value) -> ValidationResult<Product> {
        let mut product = Product::default();
        product.deserialize(data)?;
        Ok(product)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fedora() -> Product {
        Product::new("Fedora", "A red hat", dec!(12.50), true, Category::Cloths)
    }

    fn sneakers(overrides: Value) -> Value {
        let mut data = json!({
            "id": 1,
            "name": "Nike Sneakers",
            "description": "Kids Shoes",
            "category": "CLOTHS",
            "price": 250,
            "available": true
        });
        if let (Some(base), Value::Object(extra)) = (data.as_object_mut(), overrides) {
            base.extend(extra);
        }
        data
    }

    #[test]
    fn test_create_a_product() {
        let product = fedora();
        assert_eq!(product.to_string(), "<Product Fedora id=[None]>");
        assert_eq!(product.id, None);
        assert_eq!(product.name, "Fedora");
        assert_eq!(product.description, "A red hat");
        assert!(product.available);
        assert_eq!(product.price, dec!(12.5));
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn test_display_with_id() {
        let product = Product {
            id: Some(7),
            ..fedora()
        };
        assert_eq!(product.to_string(), "<Product Fedora id=[7]>");
    }

    #[test]
    fn test_defaults() {
        let product = Product {
            name: "Hammer".to_string(),
            ..Product::default()
        };
        assert_eq!(product.id, None);
        assert_eq!(product.description, "");
        assert_eq!(product.price, Decimal::ZERO);
        assert!(product.available);
        assert_eq!(product.category, Category::Unknown);
    }

    #[test]
    fn test_category_parse_is_strict() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("cloths".parse::<Category>().is_err());
        assert!(matches!(
            "Mexican".parse::<Category>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_category_serde_uses_member_names() {
        assert_eq!(serde_json::to_value(Category::Housewares).unwrap(), json!("HOUSEWARES"));
        let parsed: Category = serde_json::from_value(json!("TOOLS")).unwrap();
        assert_eq!(parsed, Category::Tools);
        assert!(serde_json::from_value::<Category>(json!("Tools")).is_err());
    }

    #[test]
    fn test_persisted_id() {
        let mut product = fedora();
        assert!(matches!(
            product.persisted_id("update"),
            Err(CoreError::MissingIdentifier { .. })
        ));
        product.id = Some(0);
        assert!(matches!(
            product.persisted_id("update"),
            Err(CoreError::InvalidIdentifier { id: 0, .. })
        ));
        product.id = Some(42);
        assert_eq!(product.persisted_id("update").unwrap(), 42);
    }

    #[test]
    fn test_serialize() {
        let product = Product {
            id: Some(3),
            ..fedora()
        };
        let data = Value::Object(product.serialize());
        assert_eq!(
            data,
            json!({
                "id": 3,
                "name": "Fedora",
                "description": "A red hat",
                "price": "12.50",
                "available": true,
                "category": "CLOTHS"
            })
        );
    }

    #[test]
    fn test_serialize_then_deserialize() {
        let original = fedora();
        let data = Value::Object(original.serialize());
        let copy = Product::from_value(&data).unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_deserialize_chains_and_ignores_id() {
        let mut product = Product {
            id: Some(9),
            ..fedora()
        };
        let name = product.deserialize(&sneakers(json!({}))).unwrap().name.clone();
        assert_eq!(name, "Nike Sneakers");
        assert_eq!(product.id, Some(9));
        assert_eq!(product.price, dec!(250));
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn test_deserialization_nodata_error() {
        let mut product = fedora();
        assert_eq!(product.deserialize(&Value::Null).unwrap_err(), ValidationError::NoData);
        assert_eq!(product.deserialize(&json!([1, 2])).unwrap_err(), ValidationError::NoData);
    }

    #[test]
    fn test_no_data_attribute_error() {
        let mut product = fedora();
        assert!(matches!(
            product.deserialize(&json!({})),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_each_missing_key_is_reported() {
        for key in ["name", "description", "price", "available", "category"] {
            let mut data = sneakers(json!({}));
            if let Some(map) = data.as_object_mut() {
                map.remove(key);
            }
            let err = Product::from_value(&data).unwrap_err();
            assert_eq!(
                err,
                ValidationError::Required {
                    field: key.to_string()
                }
            );
        }
    }

    #[test]
    fn test_invalid_category_error() {
        let err = Product::from_value(&sneakers(json!({"category": "Mexican"}))).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));

        let err = Product::from_value(&sneakers(json!({"category": 3}))).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_invalid_boolean_error() {
        for bad in [json!(23), json!(47), json!("true"), json!(0)] {
            let err = Product::from_value(&sneakers(json!({ "available": bad }))).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidType { .. }));
        }
    }

    #[test]
    fn test_bad_price_error() {
        let err = Product::from_value(&sneakers(json!({"price": "Fifty Cents"}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_bad_data_error() {
        let data = json!({
            "id": true,
            "name": "Nike Sneakers",
            "description": "Kids Shoes",
            "category": "CLOTHS",
            "price": "Fifty Cents",
            "available": 47
        });
        assert!(Product::from_value(&data).is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = Product::from_value(&sneakers(json!({"name": "  "}))).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn test_failed_deserialize_leaves_product_untouched() {
        let mut product = fedora();
        let before = product.clone();
        let data = sneakers(json!({"name": "Changed", "available": 23}));
        assert!(product.deserialize(&data).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn test_deserialize_accepts_text_price() {
        let product = Product::from_value(&sneakers(json!({"price": " 12.50 "}))).unwrap();
        assert_eq!(product.price, dec!(12.5));
    }
}
