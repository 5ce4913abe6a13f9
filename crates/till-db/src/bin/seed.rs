//! # Seed Data Generator
//!
//! Fills a development database with a small shop's inventory.
//!
//! ## Usage
//! ```bash
//! # Generate 40 products (default)
//! cargo run -p till-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p till-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! Prices land between $0.25 and $8.24, stock between 0 and 24, so a fresh
//! catalog always contains a few sold-out items to test against.

use std::env;
use till_core::{Money, NewProduct};
use till_db::{Database, DbConfig};

const DEFAULT_COUNT: usize = 40;
const DEFAULT_DB_PATH: &str = "./till_dev.db";

/// Shelf items, cycled when more products are requested than listed.
const ITEMS: &[&str] = &[
    "Soda",
    "Diet Soda",
    "Sparkling Water",
    "Orange Juice",
    "Iced Tea",
    "Coffee",
    "Chips",
    "Pretzels",
    "Popcorn",
    "Chocolate Bar",
    "Gummy Bears",
    "Mints",
    "Granola Bar",
    "Cookies",
    "Banana",
    "Apple",
    "Sandwich",
    "Muffin",
    "Bagel",
    "Yogurt",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Till Seed Data Generator");
    println!("========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let product = generate_product(seed)?;

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());

    let sold_out = db
        .products()
        .list_all()
        .await?
        .iter()
        .filter(|p| !p.is_in_stock())
        .count();
    println!("  Sold out: {}", sold_out);

    db.close().await;
    Ok(())
}

/// Builds one deterministic product from its index.
fn generate_product(seed: usize) -> Result<NewProduct, till_core::ValidationError> {
    let base = ITEMS[seed % ITEMS.len()];
    let round = seed / ITEMS.len();
    let name = if round == 0 {
        base.to_string()
    } else {
        format!("{} #{}", base, round + 1)
    };

    let price = Money::from_cents(25 + ((seed * 37) % 800) as i64);
    let stock = (seed * 7 % 25) as i64;

    NewProduct::new(name, price, stock, None)
}
