// ABOUTME: USDA FoodData Central API client for international food search and barcode lookup
// ABOUTME: Implements search, UPC resolution, response caching, and rate limiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! USDA `FoodData` Central API client.
//!
//! `FoodData` Central is the international nutrition database behind both
//! free-text search and barcode resolution (branded foods are indexed by
//! GTIN/UPC). The API is free and requires only an API key.
//!
//! # Features
//! - Food search returning raw nutrient records
//! - UPC lookup through the branded-foods search endpoint
//! - 24-hour response caching to minimize API calls
//! - Sliding-window rate limiting (30 requests per minute by default)
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::errors::{AppError, AppResult};
use crate::models::{FdcFoodRecord, FdcNutrient};
use crate::sources::{BarcodeLookup, InternationalFoodSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// FoodData Central client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdcClientConfig {
    /// API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Cache TTL in seconds (default: 86400 = 24 hours)
    pub cache_ttl_secs: u64,
    /// Rate limit per minute (default: 30)
    pub rate_limit_per_minute: u32,
}

impl Default for FdcClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
            cache_ttl_secs: 86_400,
            rate_limit_per_minute: 30,
        }
    }
}

/// FDC search response (wire format)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    foods: Vec<SearchResponseFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponseFood {
    fdc_id: u64,
    description: String,
    data_type: Option<String>,
    brand_name: Option<String>,
    brand_owner: Option<String>,
    food_category: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<SearchResponseNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponseNutrient {
    nutrient_id: u32,
    nutrient_name: Option<String>,
    nutrient_number: Option<String>,
    unit_name: Option<String>,
    value: Option<f64>,
}

impl SearchResponseFood {
    fn into_record(self) -> FdcFoodRecord {
        FdcFoodRecord {
            fdc_id: self.fdc_id.to_string(),
            description: self.description,
            data_type: self.data_type,
            brand_name: self.brand_name.or(self.brand_owner),
            food_category: self.food_category,
            food_nutrients: self
                .food_nutrients
                .into_iter()
                .map(|n| FdcNutrient {
                    nutrient_id: n.nutrient_id,
                    name: n.nutrient_name.unwrap_or_default(),
                    number: n.nutrient_number,
                    unit_name: n.unit_name.unwrap_or_default(),
                    amount: n.value.unwrap_or(0.0),
                })
                .collect(),
        }
    }
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Check if a request can be made, removing expired entries
    fn can_request(&mut self) -> bool {
        let now = Instant::now();
        self.requests
            .retain(|&t| now.duration_since(t) < self.window);
        self.requests.len() < self.limit as usize
    }

    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }

    /// Wait until a request can be made
    async fn wait_if_needed(&mut self) {
        while !self.can_request() {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

/// USDA `FoodData` Central API client
pub struct FdcClient {
    config: FdcClientConfig,
    http_client: reqwest::Client,
    search_cache: Arc<RwLock<HashMap<String, CacheEntry<Vec<FdcFoodRecord>>>>>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl FdcClient {
    /// Default number of search results requested per query
    pub const DEFAULT_PAGE_SIZE: u32 = 25;

    /// Create a new FoodData Central client
    #[must_use]
    pub fn new(config: FdcClientConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));

        Self {
            config,
            http_client: reqwest::Client::new(),
            search_cache: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: Arc::new(RwLock::new(rate_limiter)),
        }
    }

    /// Search for foods by free-text query
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty, the page size is out of
    /// range, or the API request fails
    pub async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> AppResult<Vec<FdcFoodRecord>> {
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        if page_size == 0 || page_size > 200 {
            return Err(AppError::out_of_range("Page size must be between 1 and 200"));
        }

        let cache_key = format!("{query}:{page_size}");
        if let Some(cached) = self.cached_search(&cache_key).await {
            debug!(query, "FDC search served from cache");
            return Ok(cached);
        }

        let response = self
            .request(
                "/foods/search",
                &[("query", query), ("pageSize", &page_size.to_string())],
            )
            .await?;
        let foods: Vec<FdcFoodRecord> = response
            .foods
            .into_iter()
            .map(SearchResponseFood::into_record)
            .collect();

        self.cache_search(cache_key, foods.clone()).await;
        Ok(foods)
    }

    /// Look up a branded product by UPC/GTIN barcode
    ///
    /// Branded foods are indexed by barcode in the search endpoint; an empty
    /// hit list means the product is unknown and maps to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or the API request fails
    pub async fn lookup_barcode(&self, code: &str) -> AppResult<Option<FdcFoodRecord>> {
        if code.trim().is_empty() {
            return Err(AppError::invalid_input("Barcode cannot be empty"));
        }

        let cache_key = format!("upc:{code}");
        if let Some(cached) = self.cached_search(&cache_key).await {
            return Ok(cached.into_iter().next());
        }

        let response = self
            .request(
                "/foods/search",
                &[("query", code), ("dataType", "Branded"), ("pageSize", "1")],
            )
            .await?;
        let foods: Vec<FdcFoodRecord> = response
            .foods
            .into_iter()
            .map(SearchResponseFood::into_record)
            .collect();

        self.cache_search(cache_key, foods.clone()).await;
        Ok(foods.into_iter().next())
    }

    async fn request(&self, path: &str, params: &[(&str, &str)]) -> AppResult<SearchResponse> {
        {
            let mut limiter = self.rate_limiter.write().await;
            limiter.wait_if_needed().await;
            limiter.record_request();
        }

        let url = format!("{}{path}", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::external_service("FoodData Central", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "FoodData Central",
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service("FoodData Central", format!("JSON parse error: {e}"))
        })
    }

    async fn cached_search(&self, key: &str) -> Option<Vec<FdcFoodRecord>> {
        let cache = self.search_cache.read().await;
        cache
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.data.clone())
    }

    async fn cache_search(&self, key: String, data: Vec<FdcFoodRecord>) {
        let mut cache = self.search_cache.write().await;
        cache.insert(
            key,
            CacheEntry {
                data,
                expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
            },
        );
    }

    /// Clear the response cache (useful for testing)
    pub async fn clear_cache(&self) {
        self.search_cache.write().await.clear();
    }

    /// Number of cached search responses (useful for monitoring)
    pub async fn cache_len(&self) -> usize {
        self.search_cache.read().await.len()
    }
}

#[async_trait]
impl InternationalFoodSource for FdcClient {
    async fn search(&self, query: &str) -> AppResult<Vec<FdcFoodRecord>> {
        self.search_foods(query, Self::DEFAULT_PAGE_SIZE).await
    }
}

#[async_trait]
impl BarcodeLookup for FdcClient {
    async fn lookup(&self, code: &str) -> AppResult<Option<FdcFoodRecord>> {
        self.lookup_barcode(code).await
    }
}
