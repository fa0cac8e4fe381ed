//! # Repository Module
//!
//! Database repository implementations for the product catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Plain data (catalog_core::Product) never talks to the database.       │
//! │  The repository does, using a pool handed to it at construction.       │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.products().create(&mut product)                            │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── create / update / delete                                          │
//! │  ├── find / all / count                                                │
//! │  └── find_by_* ──► ProductQuery (lazy)                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and lookups

pub mod product;
