// ABOUTME: Command-line food search utility for exercising the resolution engine
// ABOUTME: Searches the configured sources and prints nutrition for a quantity/unit pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Usage:
//! ```bash
//! # Search all sources (FDC_API_KEY must be set for international results)
//! food-search query "roti"
//!
//! # Search one source and compute nutrition for a quantity
//! food-search query "chicken breast" --mode international --quantity 150 --unit g
//!
//! # Resolve a scanned barcode
//! food-search barcode 0123456789012
//! ```

use calorie_tracker::barcode::{resolve_barcode, BarcodeResolution, NOT_FOUND_MESSAGE};
use calorie_tracker::compute::{compute_nutrition_detailed, unit_advisory};
use calorie_tracker::config::TrackerConfig;
use calorie_tracker::errors::AppResult;
use calorie_tracker::logging::init_logging;
use calorie_tracker::models::{CanonicalFood, Unit};
use calorie_tracker::search::{search_foods, SearchMode};
use calorie_tracker::sources::{FdcClient, RegionalFoodClient, StaticRegionalSource};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "food-search",
    about = "Search food databases and compute nutrition totals"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Free-text food search across the configured sources
    Query {
        /// Search text (two characters minimum)
        text: String,

        /// Source selection: all, regional, international, custom
        #[arg(long, default_value = "all")]
        mode: String,

        /// Quantity to compute nutrition for
        #[arg(long, default_value_t = 100.0)]
        quantity: f64,

        /// Unit: g, ml, oz, serving, piece
        #[arg(long, default_value = "g")]
        unit: String,
    },
    /// Resolve a scanned barcode to a product
    Barcode {
        /// Decoded barcode digits
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = TrackerConfig::from_env()?;
    let fdc = FdcClient::new(config.fdc.clone());

    match Cli::parse().command {
        Command::Query {
            text,
            mode,
            quantity,
            unit,
        } => {
            let mode = SearchMode::from_str_lossy(&mode);
            let unit = Unit::from_str_lossy(&unit);
            let candidates = run_query(&config, &fdc, &text, mode).await?;

            if candidates.is_empty() {
                println!("No foods found for {text:?}");
                return Ok(());
            }
            for food in &candidates {
                print_food(food, quantity, unit);
            }
        }
        Command::Barcode { code } => match resolve_barcode(&code, &fdc).await? {
            BarcodeResolution::Found(food) => print_food(&food, 1.0, Unit::Serving),
            BarcodeResolution::NotFound => println!("{NOT_FOUND_MESSAGE}"),
        },
    }

    Ok(())
}

async fn run_query(
    config: &TrackerConfig,
    fdc: &FdcClient,
    text: &str,
    mode: SearchMode,
) -> AppResult<Vec<CanonicalFood>> {
    // No persistence layer here, so the custom-food snapshot is empty.
    match &config.regional_base_url {
        Some(base) => {
            let regional = RegionalFoodClient::new(base.clone());
            search_foods(text, mode, &[], &regional, fdc).await
        }
        None => {
            let regional = StaticRegionalSource::new(vec![]);
            search_foods(text, mode, &[], &regional, fdc).await
        }
    }
}

fn print_food(food: &CanonicalFood, quantity: f64, unit: Unit) {
    let nutrition = compute_nutrition_detailed(food, quantity, unit);
    println!(
        "[{:?}] {} ({}): {:.0} kcal | {:.1}g protein | {:.1}g carbs | {:.1}g fat ({} {})",
        food.provenance,
        food.display_name,
        food.id,
        nutrition.calories,
        nutrition.protein,
        nutrition.carbs,
        nutrition.fat,
        quantity,
        unit.as_str(),
    );
    if let Some(fiber) = nutrition.fiber {
        println!("  fiber: {fiber:.1}g");
    }
    if let Some(tip) = unit_advisory(food, unit) {
        println!("  tip: {tip}");
    }
}
