// ABOUTME: Library entry point for the food resolution and nutrition computation engine
// ABOUTME: Exposes normalization, search fan-out, classification, computation, barcode modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

#![deny(unsafe_code)]

//! # Calorie Tracker Engine
//!
//! Food resolution and nutrition computation for daily intake tracking.
//! Given a free-text query or a scanned barcode, the engine reconciles
//! results from three heterogeneous sources (a regional foods table, USDA
//! `FoodData` Central, and the user's custom foods), normalizes each into
//! one canonical nutrient representation, and converts a user-entered
//! quantity/unit pair into macronutrient totals, applying the per-piece
//! policy for foods conventionally counted rather than weighed.
//!
//! Persistence, HTTP transport, authentication, and UI are external
//! collaborators: the engine is pure/async functions over explicit inputs,
//! with no ambient state.
//!
//! ## Architecture
//!
//! - **Models**: canonical food and nutrient representations
//! - **Sources**: trait seams and clients for the three food databases
//! - **Normalizer**: per-source transforms into the canonical shape
//! - **Search**: concurrent fan-out with fixed merge precedence
//! - **Compute**: multiplier policy and nutrition totals
//! - **Barcode**: scanned-code resolution through the same pipeline
//!
//! ## Example
//!
//! ```rust,no_run
//! use calorie_tracker::config::TrackerConfig;
//! use calorie_tracker::search::{search_foods, SearchMode};
//! use calorie_tracker::sources::{FdcClient, StaticRegionalSource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TrackerConfig::from_env()?;
//! let fdc = FdcClient::new(config.fdc);
//! let regional = StaticRegionalSource::new(vec![]);
//!
//! let candidates = search_foods("roti", SearchMode::All, &[], &regional, &fdc).await?;
//! println!("{} candidates", candidates.len());
//! # Ok(())
//! # }
//! ```

/// Barcode resolution adapter
pub mod barcode;

/// Environment-based configuration
pub mod config;

/// Nutrition computation engine (multiplier policy, totals)
pub mod compute;

/// Countability classifier for piece-denominated foods
pub mod countable;

/// Unified error handling with stable error codes
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Canonical data models shared across modules
pub mod models;

/// Source-record normalization into canonical foods
pub mod normalizer;

/// Source query fan-out and stale-response guarding
pub mod search;

/// Food source traits and clients
pub mod sources;

/// Log-entry commit boundary
pub mod tracking;
