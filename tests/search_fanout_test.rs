// ABOUTME: Integration tests for the source query fan-out and merge semantics
// ABOUTME: Covers ordering, partial failure, short-query policy, and stale-response guarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors
//! Fan-out behavior tests
//!
//! Exercises the three-source search with in-test mock sources:
//! - Merge precedence Custom → Regional → International
//! - Independent branch failure degrading to partial results
//! - All-sources failure surfacing a single search error
//! - Minimum-query-length gating (no lookup issued)
//! - Single-source modes touching only their source
//! - Stale responses never overwriting a newer query's results

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use calorie_tracker::errors::{AppError, AppResult, ErrorCode};
use calorie_tracker::models::{CustomFoodRecord, FdcFoodRecord, Provenance, RegionalFoodRecord};
use calorie_tracker::search::{search_foods, QueryGuard, SearchMode};
use calorie_tracker::sources::{InternationalFoodSource, RegionalFoodSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// MOCK SOURCES
// ============================================================================

struct MockRegional {
    rows: Vec<RegionalFoodRecord>,
    fail: bool,
    calls: AtomicUsize,
    delay: Duration,
}

impl MockRegional {
    fn with_rows(rows: Vec<RegionalFoodRecord>) -> Self {
        Self {
            rows,
            fail: false,
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    fn failing() -> Self {
        Self {
            rows: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl RegionalFoodSource for MockRegional {
    async fn search(&self, _query: &str) -> AppResult<Vec<RegionalFoodRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(AppError::external_service("Regional foods", "HTTP 503"));
        }
        Ok(self.rows.clone())
    }
}

struct MockInternational {
    records: Vec<FdcFoodRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockInternational {
    fn with_records(records: Vec<FdcFoodRecord>) -> Self {
        Self {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            records: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl InternationalFoodSource for MockInternational {
    async fn search(&self, _query: &str) -> AppResult<Vec<FdcFoodRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::external_service("FoodData Central", "timeout"));
        }
        Ok(self.records.clone())
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

fn regional_row(id: i64, name: &str) -> RegionalFoodRecord {
    RegionalFoodRecord {
        id,
        food_code: None,
        food_name: name.to_owned(),
        food_group: Some("Cereals".to_owned()),
        description: None,
        calories: Some(120.0),
        protein: Some(3.0),
        carbs: Some(20.0),
        fat: Some(2.0),
        fiber: None,
        calcium: None,
        iron: None,
    }
}

fn fdc_record(id: &str, description: &str) -> FdcFoodRecord {
    FdcFoodRecord {
        fdc_id: id.to_owned(),
        description: description.to_owned(),
        data_type: Some("SR Legacy".to_owned()),
        brand_name: None,
        food_category: None,
        food_nutrients: vec![],
    }
}

fn custom_row(id: i64, name: &str) -> CustomFoodRecord {
    CustomFoodRecord {
        id,
        user_id: 1,
        food_name: name.to_owned(),
        food_group: None,
        description: None,
        calories: Some(200.0),
        protein: Some(30.0),
        carbs: Some(10.0),
        fat: Some(4.0),
        fiber: None,
        serving_size: 100.0,
        serving_unit: "g".to_owned(),
    }
}

// ============================================================================
// MERGE ORDERING
// ============================================================================

#[tokio::test]
async fn test_all_mode_merge_order_is_custom_regional_international() {
    let custom = vec![custom_row(1, "My roti mix"), custom_row(2, "Roti wrap")];
    let regional = MockRegional::with_rows(vec![regional_row(10, "Roti"), regional_row(11, "Butter roti")]);
    let international = MockInternational::with_records(vec![fdc_record("171688", "Bread, roti")]);

    let results = search_foods("roti", SearchMode::All, &custom, &regional, &international)
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].provenance, Provenance::Custom);
    assert_eq!(results[0].id, "custom-1");
    assert_eq!(results[1].id, "custom-2");
    assert_eq!(results[2].provenance, Provenance::Regional);
    assert_eq!(results[2].id, "regional-10");
    assert_eq!(results[3].id, "regional-11");
    assert_eq!(results[4].provenance, Provenance::International);
    assert_eq!(results[4].id, "171688");
}

#[tokio::test]
async fn test_merge_order_independent_of_resolution_speed() {
    // Regional is the slow branch; its results must still come before
    // the international ones.
    let mut regional = MockRegional::with_rows(vec![regional_row(10, "Roti")]);
    regional.delay = Duration::from_millis(50);
    let international = MockInternational::with_records(vec![fdc_record("171688", "Bread, roti")]);

    let results = search_foods("roti", SearchMode::All, &[], &regional, &international)
        .await
        .unwrap();

    assert_eq!(results[0].provenance, Provenance::Regional);
    assert_eq!(results[1].provenance, Provenance::International);
}

#[tokio::test]
async fn test_no_cross_source_dedup() {
    // Same physical food in two sources yields two candidates.
    let regional = MockRegional::with_rows(vec![regional_row(10, "Roti")]);
    let international = MockInternational::with_records(vec![fdc_record("171688", "Roti")]);

    let results = search_foods("roti", SearchMode::All, &[], &regional, &international)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
}

// ============================================================================
// SHORT QUERY POLICY
// ============================================================================

#[tokio::test]
async fn test_short_query_returns_empty_without_lookups() {
    let regional = MockRegional::with_rows(vec![regional_row(10, "Roti")]);
    let international = MockInternational::with_records(vec![fdc_record("1", "Rice")]);

    let results = search_foods("r", SearchMode::All, &[], &regional, &international)
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(regional.calls.load(Ordering::SeqCst), 0);
    assert_eq!(international.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_whitespace_padding_does_not_satisfy_minimum_length() {
    let regional = MockRegional::with_rows(vec![]);
    let international = MockInternational::with_records(vec![]);

    let results = search_foods("  a  ", SearchMode::All, &[], &regional, &international)
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(regional.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// SINGLE-SOURCE MODES
// ============================================================================

#[tokio::test]
async fn test_custom_mode_issues_no_lookups() {
    let custom = vec![custom_row(1, "Protein shake")];
    let regional = MockRegional::with_rows(vec![regional_row(10, "Shake bread")]);
    let international = MockInternational::with_records(vec![fdc_record("1", "Milkshake")]);

    let results = search_foods("shake", SearchMode::Custom, &custom, &regional, &international)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].provenance, Provenance::Custom);
    assert_eq!(regional.calls.load(Ordering::SeqCst), 0);
    assert_eq!(international.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_regional_mode_only_queries_regional() {
    let regional = MockRegional::with_rows(vec![regional_row(10, "Roti")]);
    let international = MockInternational::with_records(vec![fdc_record("1", "Roti")]);

    let results = search_foods("roti", SearchMode::Regional, &[], &regional, &international)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].provenance, Provenance::Regional);
    assert_eq!(international.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_single_source_mode_surfaces_its_failure() {
    let regional = MockRegional::failing();
    let international = MockInternational::with_records(vec![]);

    let err = search_foods("roti", SearchMode::Regional, &[], &regional, &international)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

// ============================================================================
// PARTIAL AND TOTAL FAILURE
// ============================================================================

#[tokio::test]
async fn test_international_failure_still_returns_custom_and_regional() {
    let custom = vec![custom_row(1, "Roti wrap")];
    let regional = MockRegional::with_rows(vec![regional_row(10, "Roti")]);
    let international = MockInternational::failing();

    let results = search_foods("roti", SearchMode::All, &custom, &regional, &international)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].provenance, Provenance::Custom);
    assert_eq!(results[1].provenance, Provenance::Regional);
}

#[tokio::test]
async fn test_regional_failure_still_returns_international() {
    let regional = MockRegional::failing();
    let international = MockInternational::with_records(vec![fdc_record("171688", "Roti")]);

    let results = search_foods("roti", SearchMode::All, &[], &regional, &international)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].provenance, Provenance::International);
}

#[tokio::test]
async fn test_all_sources_failing_surfaces_one_error() {
    let regional = MockRegional::failing();
    let international = MockInternational::failing();

    let err = search_foods("roti", SearchMode::All, &[], &regional, &international)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_custom_matches_soften_total_network_failure() {
    let custom = vec![custom_row(1, "Roti wrap")];
    let regional = MockRegional::failing();
    let international = MockInternational::failing();

    let results = search_foods("roti", SearchMode::All, &custom, &regional, &international)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].provenance, Provenance::Custom);
}

// ============================================================================
// STALE-RESPONSE GUARD
// ============================================================================

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer_query() {
    // "chi" is issued first but resolves after "chicken"; its results must
    // not be rendered.
    let guard = QueryGuard::new();

    let slow_ticket = guard.issue();
    let fast_ticket = guard.issue();

    // The fast (newer) query's results arrive and render first.
    assert!(guard.is_current(fast_ticket));

    // The slow (older) query's results arrive afterwards and are discarded.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!guard.is_current(slow_ticket));
    assert!(guard.is_current(fast_ticket));
}

#[tokio::test]
async fn test_each_new_query_supersedes_the_previous() {
    let guard = QueryGuard::new();
    let tickets: Vec<_> = (0..5).map(|_| guard.issue()).collect();

    for stale in &tickets[..4] {
        assert!(!guard.is_current(*stale));
    }
    assert!(guard.is_current(tickets[4]));
}
