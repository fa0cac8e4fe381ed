//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD: create, update, delete, find, all
//! - Attribute lookups returning a lazy [`ProductQuery`]
//!
//! ## Lazy Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How find_by_* Works                                  │
//! │                                                                         │
//! │  repo.find_by_category(Category::Food)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductQuery { filter: Category(FOOD) }   ← nothing executed yet      │
//! │       │                                                                 │
//! │       ├── .count().await      → SELECT COUNT(*) ... WHERE category = ?  │
//! │       ├── .fetch_all().await  → SELECT ...      ... WHERE category = ?  │
//! │       └── .fetch_all().await  → runs again, sees current rows          │
//! │                                                                         │
//! │  Each terminal call re-executes, so a query can be counted and then    │
//! │  traversed as often as needed.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use catalog_core::price::{canonical, parse_price};
use catalog_core::validation::validate_product;
use catalog_core::{Category, Product};
use rust_decimal::Decimal;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_PRODUCTS: &str = "SELECT id, name, description, price, available, category FROM products";

// =============================================================================
// Row Mapping
// =============================================================================

/// A `products` row as stored.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: String,
    available: bool,
    category: Category,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        let price = Decimal::from_str(&self.price).map_err(|e| DbError::CorruptRow {
            id: self.id,
            column: "price".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Product {
            id: Some(self.id),
            name: self.name,
            description: self.description,
            price,
            available: self.available,
            category: self.category,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(ProductRow::into_product).collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let mut hat = Product::new("Fedora", "A red hat", dec!(12.50), true, Category::Cloths);
/// repo.create(&mut hat).await?;
///
/// let found = repo.find(hat.id.unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product and writes the store-assigned id back into it.
    ///
    /// Any id already on the product is ignored; the store always assigns.
    ///
    /// ## Returns
    /// * `Ok(id)` - The new identifier
    /// * `Err(DbError::Domain)` - Field validation failed, nothing written
    pub async fn create(&self, product: &mut Product) -> DbResult<i64> {
        validate_product(product)?;

        if let Some(previous) = product.id {
            debug!(previous, "Ignoring caller-supplied id on create");
        }
        debug!(name = %product.name, "Creating product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, available, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.name.as_str())
        .bind(product.description.as_str())
        .bind(canonical(&product.price))
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        product.id = Some(id);

        debug!(id, "Product created");
        Ok(id)
    }

    /// Overwrites the stored row with the product's current fields.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::Domain)` - id is `None` or `0`, or validation failed;
    ///   the store is not contacted
    /// * `Err(DbError::NotFound)` - No row with that id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let id = product.persisted_id("update")?;
        validate_product(product)?;

        debug!(id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price = ?4,
                available = ?5,
                category = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(product.name.as_str())
        .bind(product.description.as_str())
        .bind(canonical(&product.price))
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Permanently removes the product's row.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::Domain)` - id is `None` or `0`
    /// * `Err(DbError::NotFound)` - Already gone
    pub async fn delete(&self, product: &Product) -> DbResult<()> {
        let id = product.persisted_id("delete")?;

        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Removes every product. Returns the number of rows deleted.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        debug!(deleted = result.rows_affected(), "Deleted all products");
        Ok(result.rows_affected())
    }

    /// Returns every product, ordered by id.
    pub async fn all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCTS} ORDER BY id");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed all products");
        into_products(rows)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find(&self, id: i64) -> DbResult<Option<Product>> {
        debug!(id, "Finding product");

        let sql = format!("{SELECT_PRODUCTS} WHERE id = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Products whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> ProductQuery {
        self.query(ProductFilter::Name(name.to_string()))
    }

    /// Products with the given availability.
    pub fn find_by_availability(&self, available: bool) -> ProductQuery {
        self.query(ProductFilter::Availability(available))
    }

    /// Products in the given category.
    pub fn find_by_category(&self, category: Category) -> ProductQuery {
        self.query(ProductFilter::Category(category))
    }

    /// Products whose price equals the given text.
    ///
    /// The text may carry surrounding whitespace or quotes; `"12.50"` and
    /// `12.5` select the same rows.
    ///
    /// ## Errors
    /// * `DbError::Domain` - the text is not a decimal number
    pub fn find_by_price(&self, price: &str) -> DbResult<ProductQuery> {
        let price = parse_price(price)?;
        Ok(self.find_by_price_value(price))
    }

    /// Products whose price equals the given decimal.
    pub fn find_by_price_value(&self, price: Decimal) -> ProductQuery {
        self.query(ProductFilter::Price(price))
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn query(&self, filter: ProductFilter) -> ProductQuery {
        ProductQuery {
            pool: self.pool.clone(),
            filter,
        }
    }
}

// =============================================================================
// Lazy Query
// =============================================================================

/// Equality filter on one product column.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    Name(String),
    Availability(bool),
    Category(Category),
    Price(Decimal),
}

impl ProductFilter {
    /// Column the filter applies to.
    pub fn column(&self) -> &'static str {
        match self {
            ProductFilter::Name(_) => "name",
            ProductFilter::Availability(_) => "available",
            ProductFilter::Category(_) => "category",
            ProductFilter::Price(_) => "price",
        }
    }

    /// Whether an in-memory product satisfies the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Availability(available) => product.available == *available,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Price(price) => product.price == *price,
        }
    }

    fn push_condition(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder.push(" WHERE ").push(self.column()).push(" = ");
        match self {
            ProductFilter::Name(name) => builder.push_bind(name.clone()),
            ProductFilter::Availability(available) => builder.push_bind(*available),
            ProductFilter::Category(category) => builder.push_bind(*category),
            ProductFilter::Price(price) => builder.push_bind(canonical(price)),
        };
    }
}

/// A deferred product lookup.
///
/// Holds only the filter and a pool handle. Every terminal method runs the
/// query anew, so results always reflect the store at call time.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pool: SqlitePool,
    filter: ProductFilter,
}

impl ProductQuery {
    /// The filter this query applies.
    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Number of matching products.
    pub async fn count(&self) -> DbResult<i64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        self.filter.push_condition(&mut builder);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        debug!(column = self.filter.column(), count, "Counted products");
        Ok(count)
    }

    /// All matching products, ordered by id.
    pub async fn fetch_all(&self) -> DbResult<Vec<Product>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS);
        self.filter.push_condition(&mut builder);
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!(column = self.filter.column(), count = rows.len(), "Fetched products");
        into_products(rows)
    }

    /// The matching product with the lowest id, if any.
    pub async fn first(&self) -> DbResult<Option<Product>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS);
        self.filter.push_condition(&mut builder);
        builder.push(" ORDER BY id LIMIT 1");

        let row = builder
            .build_query_as::<ProductRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{init_db, DbConfig};
    use rust_decimal_macros::dec;

    async fn repo() -> ProductRepository {
        init_db(DbConfig::in_memory()).await.unwrap().products()
    }

    fn fedora() -> Product {
        Product::new("Fedora", "A red hat", dec!(12.50), true, Category::Cloths)
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = repo().await;
        let mut product = fedora();

        let id = repo.create(&mut product).await.unwrap();

        assert_eq!(product.id, Some(id));
        assert!(id > 0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_ignores_preset_id() {
        let repo = repo().await;
        let mut first = fedora();
        repo.create(&mut first).await.unwrap();

        let mut second = Product {
            id: first.id,
            ..fedora()
        };
        repo.create(&mut second).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let repo = repo().await;
        let mut product = Product {
            name: "   ".to_string(),
            ..fedora()
        };

        let err = repo.create(&mut product).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(product.id, None);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let repo = repo().await;
        assert!(repo.find(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = repo().await;
        let product = Product {
            id: Some(99),
            ..fedora()
        };

        let err = repo.update(&product).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_without_id_is_invalid_state() {
        let repo = repo().await;
        let err = repo.update(&fedora()).await.unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[tokio::test]
    async fn test_delete_twice_signals_not_found() {
        let repo = repo().await;
        let mut product = fedora();
        repo.create(&mut product).await.unwrap();

        repo.delete(&product).await.unwrap();
        let err = repo.delete(&product).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_with_id_zero_is_invalid_state() {
        let repo = repo().await;
        let mut product = fedora();
        repo.create(&mut product).await.unwrap();

        product.id = Some(0);
        let err = repo.delete(&product).await.unwrap_err();

        assert!(err.is_invalid_state());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = repo().await;
        for _ in 0..3 {
            repo.create(&mut fedora()).await.unwrap();
        }

        assert_eq!(repo.delete_all().await.unwrap(), 3);
        assert!(repo.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_round_trips_by_value() {
        let repo = repo().await;
        let mut product = fedora();
        let id = repo.create(&mut product).await.unwrap();

        let found = repo.find(id).await.unwrap().unwrap();
        assert_eq!(found.price, dec!(12.5));
        assert_eq!(found, product);
    }

    #[tokio::test]
    async fn test_query_sees_rows_created_after_it_was_built() {
        let repo = repo().await;
        let query = repo.find_by_name("Fedora");
        assert_eq!(query.count().await.unwrap(), 0);

        repo.create(&mut fedora()).await.unwrap();

        assert_eq!(query.count().await.unwrap(), 1);
        assert_eq!(query.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_first_returns_lowest_id() {
        let repo = repo().await;
        let mut a = fedora();
        let mut b = fedora();
        repo.create(&mut a).await.unwrap();
        repo.create(&mut b).await.unwrap();

        let first = repo.find_by_name("Fedora").first().await.unwrap().unwrap();
        assert_eq!(first.id, a.id);
        assert!(repo.find_by_name("Bowler").first().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_price_spellings() {
        let repo = repo().await;
        repo.create(&mut fedora()).await.unwrap();
        let mut cheap = Product {
            price: dec!(1.25),
            ..fedora()
        };
        repo.create(&mut cheap).await.unwrap();

        let spellings = [
            "12.50",
            "12.5",
            " 12.500 ",
            "\"12.50\"",
            "'12.5'",
            "12.50\"",
            "\"12.50",
            "\"\"12.50\"\"",
        ];
        for text in spellings {
            let query = repo.find_by_price(text).unwrap();
            assert_eq!(query.count().await.unwrap(), 1, "price text {text:?}");
        }
        assert_eq!(repo.find_by_price("99").unwrap().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_by_price_rejects_words() {
        let repo = repo().await;
        let err = repo.find_by_price("Fifty Cents").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_filter_matches() {
        let product = fedora();
        assert!(ProductFilter::Name("Fedora".to_string()).matches(&product));
        assert!(ProductFilter::Availability(true).matches(&product));
        assert!(!ProductFilter::Category(Category::Food).matches(&product));
        assert!(ProductFilter::Price(dec!(12.500)).matches(&product));
        assert_eq!(ProductFilter::Availability(false).column(), "available");
    }
}
