//! # Seed Data Generator
//!
//! Populates a database with merchants and items for local development.
//!
//! ## Usage
//! ```bash
//! # 8 merchants, 10 items each (default)
//! cargo run -p bazaar-db --bin seed
//!
//! # More items per merchant
//! cargo run -p bazaar-db --bin seed -- --items 50
//!
//! # Specify database path
//! cargo run -p bazaar-db --bin seed -- --db ./data/bazaar.db
//! ```
//!
//! The merchant names all contain "mart" or "wal" so `merchants/find` has
//! something interesting to choose between.

use anyhow::Context;
use bazaar_core::{NewItem, PriceInput};
use bazaar_db::{Database, DbConfig};
use std::env;

const MERCHANTS: &[&str] = &[
    "walmart",
    "walgreens",
    "Malmart",
    "K-Mart",
    "Ballmart",
    "Carmart",
    "minimart",
    "ezmart",
];

const WORDS: &[&str] = &[
    "kale", "vinyl", "fixie", "tofu", "kombucha", "quinoa", "banjo", "typewriter", "cardigan",
    "mustache", "flannel", "artisan", "sriracha", "messenger bag", "table", "tablet",
];

const ADJECTIVES: &[&str] = &[
    "small", "vintage", "organic", "handmade", "reclaimed", "ethical", "raw", "heirloom",
];

const DEFAULT_ITEMS_PER_MERCHANT: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut per_merchant = DEFAULT_ITEMS_PER_MERCHANT;
    let mut db_path = String::from("./bazaar.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--items" | "-n" => {
                if let Some(value) = args.get(i + 1) {
                    per_merchant = value
                        .parse()
                        .with_context(|| format!("--items expects a number, got '{value}'"))?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = value.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -n, --items <N>    Items per merchant (default: {})",
                    DEFAULT_ITEMS_PER_MERCHANT
                );
                println!("  -d, --db <PATH>    Database file path (default: ./bazaar.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Bazaar Seed Data Generator");
    println!("==========================");
    println!("Database: {db_path}");
    println!("Merchants: {}", MERCHANTS.len());
    println!("Items per merchant: {per_merchant}");
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.merchants().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {existing} merchants");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0usize;

    for (merchant_idx, name) in MERCHANTS.iter().enumerate() {
        let merchant = db.merchants().insert(name).await?;

        for item_idx in 0..per_merchant {
            let seed = merchant_idx * 1000 + item_idx;
            db.items()
                .create(generate_item(merchant.id, seed))
                .await
                .with_context(|| format!("creating item {item_idx} for {name}"))?;
            generated += 1;
        }
    }

    println!();
    println!("✓ Generated {generated} items in {:?}", start.elapsed());

    println!();
    println!("Verifying lookups...");
    if let Some(found) = db.merchants().find_first_by_name("mart").await? {
        println!("  merchants/find?name=mart → {}", found.name);
    }
    println!("  items: {}", db.items().count().await?);

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// A deterministic item: "<adjective> <word>" priced between 10.00 and 99.99.
fn generate_item(merchant_id: i64, seed: usize) -> NewItem {
    let adjective = ADJECTIVES[seed % ADJECTIVES.len()];
    let word = WORDS[(seed * 7) % WORDS.len()];
    let cents = 1_000 + (seed * 379) % 9_000;

    NewItem {
        name: Some(format!("{adjective} {word}")),
        description: Some(format!(
            "A {adjective} {word}, {} edition.",
            WORDS[(seed * 3 + 1) % WORDS.len()]
        )),
        unit_price: Some(PriceInput::Text(format!("{}.{:02}", cents / 100, cents % 100))),
        merchant_id: Some(merchant_id),
    }
}
