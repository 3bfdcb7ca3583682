// ABOUTME: Regional foods source implementations over HTTP and in-memory snapshots
// ABOUTME: RegionalFoodClient queries a deployed service; StaticRegionalSource filters a table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Regional foods source.
//!
//! The regional table is a black-box capability from the engine's point of
//! view. Two implementations ship here: [`RegionalFoodClient`] for a
//! deployed lookup service, and [`StaticRegionalSource`] for an in-memory
//! snapshot of the table (tests, demos, and offline use).

use crate::errors::{AppError, AppResult};
use crate::models::RegionalFoodRecord;
use crate::sources::RegionalFoodSource;
use async_trait::async_trait;

/// HTTP client for a regional foods lookup service
///
/// Expects `GET {base_url}/search?query=...` returning a JSON array of
/// regional food rows.
pub struct RegionalFoodClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RegionalFoodClient {
    /// Create a client for the service at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RegionalFoodSource for RegionalFoodClient {
    async fn search(&self, query: &str) -> AppResult<Vec<RegionalFoodRecord>> {
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| AppError::external_service("Regional foods", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Regional foods",
                format!("HTTP {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service("Regional foods", format!("JSON parse error: {e}"))
        })
    }
}

/// In-memory regional foods source over a table snapshot
///
/// Case-insensitive substring match on the food name, the same filter the
/// fan-out applies to custom foods.
pub struct StaticRegionalSource {
    records: Vec<RegionalFoodRecord>,
}

impl StaticRegionalSource {
    /// Create a source over the given table snapshot
    #[must_use]
    pub fn new(records: Vec<RegionalFoodRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RegionalFoodSource for StaticRegionalSource {
    async fn search(&self, query: &str) -> AppResult<Vec<RegionalFoodRecord>> {
        let needle = query.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.food_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str) -> RegionalFoodRecord {
        RegionalFoodRecord {
            id,
            food_code: None,
            food_name: name.to_owned(),
            food_group: None,
            description: None,
            calories: Some(100.0),
            protein: Some(2.0),
            carbs: Some(18.0),
            fat: Some(1.0),
            fiber: None,
            calcium: None,
            iron: None,
        }
    }

    #[tokio::test]
    async fn test_static_source_substring_match() {
        let source = StaticRegionalSource::new(vec![
            row(1, "Roti"),
            row(2, "Masala Dosa"),
            row(3, "Plain Dosa"),
        ]);
        let hits = source.search("dosa").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].food_name, "Masala Dosa");
    }

    #[tokio::test]
    async fn test_static_source_no_match() {
        let source = StaticRegionalSource::new(vec![row(1, "Roti")]);
        assert!(source.search("pizza").await.unwrap().is_empty());
    }
}
