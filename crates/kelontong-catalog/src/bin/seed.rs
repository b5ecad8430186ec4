//! # Starter Data Export
//!
//! Writes the starter catalog as JSON so the front-end can be developed
//! against the same data the app boots with.
//!
//! ## Usage
//! ```bash
//! # Print to stdout
//! cargo run -p kelontong-catalog --bin seed
//!
//! # Write to a file
//! cargo run -p kelontong-catalog --bin seed -- --out ./data/catalog.json
//! ```

use std::env;
use std::fs;

use serde::Serialize;

use kelontong_catalog::seed;
use kelontong_core::{Customer, Product, ProductCategory};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StarterData {
    categories: Vec<ProductCategory>,
    products: Vec<Product>,
    customers: Vec<Customer>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut out_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kelontong POS Starter Data Export");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Write JSON to a file instead of stdout");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let data = StarterData {
        categories: seed::sample_categories(),
        products: seed::sample_products(),
        customers: seed::sample_customers(),
    };
    let json = serde_json::to_string_pretty(&data)?;

    match out_path {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!(
                "✓ Wrote {} categories, {} products, {} customers to {}",
                data.categories.len(),
                data.products.len(),
                data.customers.len(),
                path
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
