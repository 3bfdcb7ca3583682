// ABOUTME: Source query fan-out merging regional, international, and custom food matches
// ABOUTME: Settle-all concurrency, fixed merge precedence, and stale-response guarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Source query fan-out.
//!
//! Free-text queries fan out to up to three sources. Custom foods are
//! filtered synchronously from the caller's snapshot; the regional and
//! international lookups run concurrently with join semantics (the merge
//! waits for the slower branch, never first-come-first-served). Each network
//! branch settles independently: a failed branch contributes an empty list
//! and the survivors' results are still returned. The merge order is always
//! Custom → Regional → International regardless of which call resolved
//! first.
//!
//! No deduplication happens across sources: the same physical food in two
//! sources yields two candidates. The fan-out is stateless; callers debounce
//! keystrokes (see [`crate::config::TrackerConfig::search_debounce`]) and
//! use [`QueryGuard`] to drop results from superseded queries.

use crate::errors::{AppError, AppResult};
use crate::models::{CanonicalFood, CustomFoodRecord, Provenance};
use crate::normalizer::{normalize_custom, normalize_fdc, normalize_regional};
use crate::sources::{InternationalFoodSource, RegionalFoodSource};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Minimum trimmed query length before any lookup is issued
///
/// Shorter queries return an empty list immediately; this is a cost-control
/// policy, not a validation error.
pub const MIN_QUERY_LEN: usize = 2;

/// Which sources a query targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// All three sources, merged Custom → Regional → International
    All,
    /// Regional foods table only
    Regional,
    /// International database only
    International,
    /// User's custom foods only (no network lookup)
    Custom,
}

impl SearchMode {
    /// Parse a search mode from user input, defaulting to all sources
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "regional" => Self::Regional,
            "international" => Self::International,
            "custom" => Self::Custom,
            _ => Self::All,
        }
    }
}

/// Filter a custom-food snapshot by case-insensitive substring match
fn filter_custom(custom_foods: &[CustomFoodRecord], query: &str) -> Vec<CanonicalFood> {
    let needle = query.to_lowercase();
    custom_foods
        .iter()
        .filter(|f| f.food_name.to_lowercase().contains(&needle))
        .map(normalize_custom)
        .collect()
}

/// Search for foods across the configured sources
///
/// `custom_foods` is a read-only snapshot owned by the caller for this call.
/// In `All` mode the two network lookups run concurrently and settle
/// independently; a single branch failure degrades to an empty contribution
/// and is logged, never surfaced.
///
/// # Errors
///
/// Returns an error when every issued network lookup failed and the local
/// snapshot produced nothing to show (single-source modes surface their one
/// branch's failure directly). `Custom` mode never fails.
pub async fn search_foods(
    query: &str,
    mode: SearchMode,
    custom_foods: &[CustomFoodRecord],
    regional: &dyn RegionalFoodSource,
    international: &dyn InternationalFoodSource,
) -> AppResult<Vec<CanonicalFood>> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    match mode {
        SearchMode::Custom => Ok(filter_custom(custom_foods, trimmed)),
        SearchMode::Regional => {
            let rows = regional.search(trimmed).await?;
            Ok(rows.iter().map(normalize_regional).collect())
        }
        SearchMode::International => {
            let records = international.search(trimmed).await?;
            Ok(records
                .iter()
                .map(|r| normalize_fdc(r, Provenance::International))
                .collect())
        }
        SearchMode::All => search_all(trimmed, custom_foods, regional, international).await,
    }
}

async fn search_all(
    query: &str,
    custom_foods: &[CustomFoodRecord],
    regional: &dyn RegionalFoodSource,
    international: &dyn InternationalFoodSource,
) -> AppResult<Vec<CanonicalFood>> {
    let custom_matches = filter_custom(custom_foods, query);

    // Join semantics: both branches always complete; a fast source never
    // short-circuits the other.
    let (regional_result, international_result) =
        tokio::join!(regional.search(query), international.search(query));

    let both_failed = regional_result.is_err() && international_result.is_err();

    let regional_matches: Vec<CanonicalFood> = match regional_result {
        Ok(rows) => rows.iter().map(normalize_regional).collect(),
        Err(e) => {
            warn!(error = %e, "Regional food lookup failed, continuing without it");
            Vec::new()
        }
    };
    let international_matches: Vec<CanonicalFood> = match international_result {
        Ok(records) => records
            .iter()
            .map(|r| normalize_fdc(r, Provenance::International))
            .collect(),
        Err(e) => {
            warn!(error = %e, "International food lookup failed, continuing without it");
            Vec::new()
        }
    };

    if both_failed && custom_matches.is_empty() {
        return Err(AppError::external_service(
            "Food search",
            "All food sources failed, try again",
        ));
    }

    debug!(
        query,
        custom = custom_matches.len(),
        regional = regional_matches.len(),
        international = international_matches.len(),
        "merged search candidates"
    );

    // Fixed precedence: Custom → Regional → International.
    let mut merged = custom_matches;
    merged.extend(regional_matches);
    merged.extend(international_matches);
    Ok(merged)
}

/// Guard against stale search responses overwriting newer ones
///
/// Each new query takes a ticket; a slow response for an old ticket is no
/// longer current and must be discarded by the caller instead of rendered.
#[derive(Debug, Default)]
pub struct QueryGuard {
    latest: AtomicU64,
}

/// Ticket identifying one issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

impl QueryGuard {
    /// Create a fresh guard
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new query, superseding any in-flight one
    pub fn issue(&self) -> QueryTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        QueryTicket { generation }
    }

    /// Whether results for this ticket should still be rendered
    #[must_use]
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_from_str_lossy() {
        assert_eq!(SearchMode::from_str_lossy("custom"), SearchMode::Custom);
        assert_eq!(SearchMode::from_str_lossy("REGIONAL"), SearchMode::Regional);
        assert_eq!(SearchMode::from_str_lossy("anything"), SearchMode::All);
    }

    #[test]
    fn test_query_guard_supersedes_older_tickets() {
        let guard = QueryGuard::new();
        let first = guard.issue();
        assert!(guard.is_current(first));

        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_filter_custom_case_insensitive() {
        let foods = vec![CustomFoodRecord {
            id: 1,
            user_id: 1,
            food_name: "Protein Shake".to_owned(),
            food_group: None,
            description: None,
            calories: Some(200.0),
            protein: Some(30.0),
            carbs: Some(10.0),
            fat: Some(4.0),
            fiber: None,
            serving_size: 100.0,
            serving_unit: "ml".to_owned(),
        }];
        assert_eq!(filter_custom(&foods, "shake").len(), 1);
        assert_eq!(filter_custom(&foods, "SHAKE").len(), 1);
        assert!(filter_custom(&foods, "burger").is_empty());
    }
}
