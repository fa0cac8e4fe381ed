//! # Seed Data Generator
//!
//! Populates the database with factory products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default) into $DATABASE_URI
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 1000
//!
//! # Specify database URL and factory seed
//! cargo run -p catalog-db --bin seed -- --db sqlite://./data/catalog.db --seed 42
//! ```

use std::env;
use std::time::Instant;

use catalog_core::Category;
use catalog_db::{init_db, DbConfig, ProductFactory};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;
    let mut seed: Option<u64> = None;
    let mut config = DbConfig::from_env()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    config.database_url = value.clone();
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if let Some(value) = args.get(i + 1) {
                    seed = Some(value.parse()?);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Product Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 100)");
                println!("  -d, --db <URL>     Database URL (default: $DATABASE_URI)");
                println!("  -s, --seed <N>     Factory seed for reproducible data");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let db = init_db(config).await?;
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        return Ok(());
    }

    let mut factory = seed.map_or_else(ProductFactory::new, ProductFactory::with_seed);
    let start = Instant::now();
    let mut generated = 0usize;

    for mut product in factory.build_batch(count) {
        if let Err(e) = products.create(&mut product).await {
            warn!(name = %product.name, error = %e, "Failed to insert product");
            continue;
        }

        generated += 1;
        if generated % 100 == 0 {
            info!(generated, "Seeding in progress");
        }
    }

    info!(generated, elapsed = ?start.elapsed(), "Seed complete");

    for category in Category::ALL {
        let in_category = products.find_by_category(category).count().await?;
        info!(%category, count = in_category, "Category summary");
    }

    if let Some(sample) = products.all().await?.first() {
        let mapping = Value::Object(sample.serialize());
        info!(sample = %mapping, "Sample product");
    }

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Default: INFO, overridable with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
