//! # Seed Data Generator
//!
//! Populates the database with sample calculations for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 calculations (default)
//! cargo run -p tipsplit-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p tipsplit-db --bin seed -- --count 500
//!
//! # Specify database path, wiping existing history first
//! cargo run -p tipsplit-db --bin seed -- --db ./data/tipsplit.db --reset
//! ```
//!
//! ## Generated Calculations
//! Deterministic values derived from the row index:
//! - Bill: 5.00 - 504.99
//! - Tip: one of 0%, 10%, 12.5%, 15%, 18%, 20%, 25%
//! - Party: 1 - 8 people
//! - Created: spread over the last 30 days

use chrono::{Duration, Utc};
use std::env;
use tipsplit_core::{Money, NewCalculation, Percentage};
use tipsplit_db::migrations::migration_status;
use tipsplit_db::{Database, DbConfig};
use uuid::Uuid;

/// Tip rates in basis points
const TIP_RATES: &[u32] = &[0, 1000, 1250, 1500, 1800, 2000, 2500];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./tipsplit.db");
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" | "-r" => reset = true,
            "--help" | "-h" => {
                println!("Tipsplit Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of calculations to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./tipsplit.db)");
                println!("  -r, --reset        Delete existing calculations first");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tipsplit Seed Data Generator");
    println!("==============================");
    println!("Database:     {}", db_path);
    println!("Calculations: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let repo = db.calculations();

    if reset {
        let deleted = repo.delete_all().await?;
        println!("✓ Removed {} existing calculations", deleted);
    }

    let existing = repo.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} calculations", existing);
        println!("  Skipping seed to avoid mixing sample and real data.");
        println!("  Re-run with --reset to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating calculations...");

    let start = std::time::Instant::now();
    let now = Utc::now();
    let mut generated = 0;

    for seed in 0..count {
        let candidate = generate_calculation(seed);
        let created_at = now - Duration::minutes(((seed * 719) % (30 * 24 * 60)) as i64);
        let record = candidate.into_record(Uuid::new_v4().to_string(), created_at);

        if let Err(e) = repo.insert(&record).await {
            eprintln!("Failed to insert calculation {}: {}", seed, e);
            continue;
        }

        generated += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} calculations in {:?}", generated, elapsed);

    let stats = repo.aggregate().await?;
    println!();
    println!("Statistics:");
    println!("  Average tip:        {}%", stats.average_tip_percentage);
    println!("  Average bill:       {}", stats.average_bill_amount);
    println!("  Total tips:         {}", stats.total_tips_collected);
    println!("  Average party size: {}", stats.average_party_size);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one calculation with plausible values.
fn generate_calculation(seed: usize) -> NewCalculation {
    // Bill: 5.00 - 504.99
    let bill_cents = 500 + ((seed * 7919) % 50_000) as i64;

    let tip_bps = TIP_RATES[seed % TIP_RATES.len()];

    // Party: 1 - 8
    let people = 1 + (seed % 8) as i64;

    NewCalculation::compute(
        Money::from_cents(bill_cents),
        Percentage::from_bps(tip_bps),
        people,
    )
}
