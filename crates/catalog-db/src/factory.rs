//! # Product Factory
//!
//! Generates valid, varied products for tests and for the `seed` binary.
//!
//! Output is pseudo-random but fully determined by the seed, so a failing
//! test reproduces with the same data every run.

use catalog_core::{Category, Product};
use rust_decimal::Decimal;

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const ADJECTIVES: &[&str] = &[
    "Classic", "Sturdy", "Fresh", "Vintage", "Compact", "Deluxe", "Everyday", "Bright",
];

/// Lowest generated price, in cents.
const MIN_PRICE_CENTS: u64 = 50;

/// Spread of generated prices, in cents ($0.50 - $2000.49).
const PRICE_SPREAD_CENTS: u64 = 200_000;

/// Deterministic generator of unsaved products.
///
/// ## Usage
/// ```rust,ignore
/// let mut factory = ProductFactory::with_seed(7);
/// let products = factory.build_batch(10);
/// ```
#[derive(Debug, Clone)]
pub struct ProductFactory {
    state: u64,
}

impl Default for ProductFactory {
    fn default() -> Self {
        ProductFactory::with_seed(0x5EED)
    }
}

impl ProductFactory {
    /// Creates a factory with the default seed.
    pub fn new() -> Self {
        ProductFactory::default()
    }

    /// Creates a factory whose output is determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        ProductFactory { state: seed }
    }

    /// Builds one product with `id = None`.
    pub fn build(&mut self) -> Product {
        let name = self.pick(NAMES);
        let adjective = self.pick(ADJECTIVES);
        let cents = MIN_PRICE_CENTS + self.next_u64() % PRICE_SPREAD_CENTS;
        let available = self.next_u64() % 2 == 0;
        let category = self.pick(&Category::ALL);

        Product::new(
            name,
            format!("{adjective} {}", name.to_lowercase()),
            Decimal::new(cents as i64, 2),
            available,
            category,
        )
    }

    /// Builds `count` products.
    pub fn build_batch(&mut self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.build()).collect()
    }

    fn pick<T: Copy>(&mut self, choices: &[T]) -> T {
        choices[(self.next_u64() % choices.len() as u64) as usize]
    }

    // splitmix64
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::validation::validate_product;

    #[test]
    fn test_same_seed_same_products() {
        let a = ProductFactory::with_seed(1).build_batch(20);
        let b = ProductFactory::with_seed(1).build_batch(20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_products_are_valid_and_unsaved() {
        for product in ProductFactory::new().build_batch(100) {
            assert_eq!(product.id, None);
            assert!(validate_product(&product).is_ok());
            assert!(product.price >= Decimal::new(50, 2));
            assert_eq!(product.price.scale(), 2);
        }
    }

    #[test]
    fn test_batch_varies_fields() {
        let batch = ProductFactory::new().build_batch(100);
        assert!(batch.iter().any(|p| p.available));
        assert!(batch.iter().any(|p| !p.available));
        for category in Category::ALL {
            assert!(batch.iter().any(|p| p.category == category), "{category} never generated");
        }
    }
}
