//! # Seed Data Generator
//!
//! Populates an empty catalog with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default) into ./database
//! cargo run -p tally-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p tally-db --bin seed -- --count 200
//!
//! # Specify data directory
//! cargo run -p tally-db --bin seed -- --data-dir ./data
//! ```
//!
//! ## Generated Products
//! Ids run `P001`, `P002`, ... so at most 999 products fit. Each product
//! gets a category, a variant in its name, a price between 1.99 and 57.98
//! and a stock level between 0 and 40, all derived from its index so runs
//! are reproducible.

use std::env;
use tally_core::{Money, Product};
use tally_db::{Storage, StoreConfig};

/// Highest count the `P` + 3 digits id scheme allows.
const MAX_PRODUCTS: usize = 999;

/// Product categories for realistic demo data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Lighting",
        &[
            "Desk Lamp",
            "Floor Lamp",
            "Reading Light",
            "LED Strip",
            "Night Light",
            "Pendant Shade",
        ],
    ),
    (
        "Kitchen",
        &[
            "Coffee Mug",
            "Tea Kettle",
            "Chef Knife",
            "Cutting Board",
            "Water Bottle",
            "Mixing Bowl",
        ],
    ),
    (
        "Stationery",
        &[
            "Notebook",
            "Gel Pen",
            "Sticky Notes",
            "Desk Organizer",
            "Stapler",
            "Highlighter",
        ],
    ),
    (
        "Garden",
        &[
            "Plant Pot",
            "Watering Can",
            "Pruning Shears",
            "Seed Tray",
            "Garden Gloves",
            "Hose Nozzle",
        ],
    ),
    (
        "Electronics",
        &[
            "USB Cable",
            "Wall Charger",
            "Wireless Mouse",
            "Earbuds",
            "Power Bank",
            "HDMI Adapter",
        ],
    ),
];

/// Variants and the price they add, in cents
const VARIANTS: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 300),
    ("Large", 700),
    ("Black", 0),
    ("White", 0),
    ("Deluxe", 2500),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut data_dir = String::from("./database");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of products to generate (default: 50, max: 999)");
                println!("  -d, --data-dir <DIR>   Data directory (default: ./database)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let count = count.min(MAX_PRODUCTS);

    println!("🌱 tally Seed Data Generator");
    println!("============================");
    println!("Data dir: {}", data_dir);
    println!("Products: {}", count);
    println!();

    let storage = Storage::open(StoreConfig::new(&data_dir))?;
    let catalog = storage.catalog();

    println!("✓ Opened {}", catalog.path().display());

    // Check existing products
    let existing = catalog.count();
    if existing > 0 {
        println!("⚠ Catalog already has {} products", existing);
        println!("  Skipping seed to avoid overwriting them.");
        println!("  Delete the catalog file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    for index in 1..=count {
        let product = generate_product(index);

        if let Err(e) = catalog.add(product) {
            eprintln!("Failed to add P{:03}: {}", index, e);
            continue;
        }
        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    println!();
    println!("✓ Generated {} products", generated);
    println!("  Low stock (< 5): {}", catalog.list().iter().filter(|p| p.quantity < 5).count());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates the product for a 1-based index.
fn generate_product(index: usize) -> Product {
    let seed = index - 1;
    let (category, names) = CATEGORIES[seed % CATEGORIES.len()];
    let name = names[(seed / CATEGORIES.len()) % names.len()];
    let (variant, price_addon) = VARIANTS[(seed / (CATEGORIES.len() * names.len())) % VARIANTS.len()];

    // Price: base 1.99-32.98 + variant addon
    let base_price = 199 + ((seed * 37) % 3100) as i64;

    // Stock 0-40
    let quantity = ((seed * 13) % 41) as i64;

    Product {
        id: format!("P{:03}", index),
        name: format!("{} {}", name, variant),
        price: Money::from_cents(base_price + price_addon),
        quantity,
        category: category.to_string(),
        image_path: String::new(),
        description: format!("{} ({}), {}", name, variant.to_lowercase(), category.to_lowercase()),
    }
}
