//! # catalog-db: Database Layer for the Product Catalog
//!
//! This crate provides database access for the product catalog.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Catalog Data Flow                          │
//! │                                                                         │
//! │  Caller (HTTP layer, seed binary, tests)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_create_  │  │   │
//! │  │   │ DbConfig      │    │ ProductQuery  │    │  products    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Configuration, connection pool, `init_db`
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Product repository and lazy queries
//! - [`factory`] - Deterministic test-data generator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{init_db, DbConfig};
//!
//! let db = init_db(DbConfig::from_env()?).await?;
//!
//! let mut hat = Product::new("Fedora", "A red hat", dec!(12.50), true, Category::Cloths);
//! db.products().create(&mut hat).await?;
//!
//! let hats = db.products().find_by_name("Fedora");
//! println!("{} hats", hats.count().await?);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod factory;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use factory::ProductFactory;
pub use pool::{init_db, Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::{ProductFilter, ProductQuery, ProductRepository};
