// ABOUTME: Async trait seams for the three heterogeneous food data sources
// ABOUTME: Regional table, FoodData Central, and barcode lookup behind uniform contracts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Food source abstractions.
//!
//! Each upstream collaborator sits behind a trait so the fan-out and the
//! barcode adapter never care about transport. Implementations return raw
//! source records; normalization into [`crate::models::CanonicalFood`]
//! happens in [`crate::normalizer`]. All trait methods use
//! [`crate::errors::AppResult`]; the only functions in this crate permitted
//! to fail are the ones behind these seams.

/// FoodData Central client (international source + barcode lookup)
pub mod fdc;

/// Regional foods service client and in-memory snapshot source
pub mod regional;

use crate::errors::AppResult;
use crate::models::{FdcFoodRecord, RegionalFoodRecord};
use async_trait::async_trait;

/// Free-text search over the regional foods table
#[async_trait]
pub trait RegionalFoodSource: Send + Sync {
    /// Search regional foods by name
    async fn search(&self, query: &str) -> AppResult<Vec<RegionalFoodRecord>>;
}

/// Free-text search over the international nutrition database
#[async_trait]
pub trait InternationalFoodSource: Send + Sync {
    /// Search international foods by description
    async fn search(&self, query: &str) -> AppResult<Vec<FdcFoodRecord>>;
}

/// Resolve a scanned barcode to one product record
///
/// `Ok(None)` is the provider's "not found" signal and stays distinct from
/// transport errors, which surface as `Err`.
#[async_trait]
pub trait BarcodeLookup: Send + Sync {
    /// Look up a product by its decoded barcode string
    async fn lookup(&self, code: &str) -> AppResult<Option<FdcFoodRecord>>;
}

pub use fdc::{FdcClient, FdcClientConfig};
pub use regional::{RegionalFoodClient, StaticRegionalSource};
