// ABOUTME: Environment-based configuration for food sources and search behavior
// ABOUTME: Reads API keys, base URLs, and tunables with sensible defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Environment-only configuration, parsed once at startup

use crate::sources::fdc::FdcClientConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Default debounce interval for free-text search input (milliseconds).
/// Tunable via `SEARCH_DEBOUNCE_MS`; callers coalesce keystrokes with it.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// FoodData Central client settings (international source + barcode lookup)
    pub fdc: FdcClientConfig,
    /// Base URL of the regional-foods service, if one is deployed
    pub regional_base_url: Option<String>,
    /// Debounce interval callers should apply to free-text queries
    pub search_debounce_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fdc: FdcClientConfig::default(),
            regional_base_url: None,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults; malformed numeric values are
    /// logged and replaced with defaults rather than failing startup.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for parity with callers that treat
    /// configuration loading as a failable step.
    pub fn from_env() -> Result<Self> {
        let defaults = FdcClientConfig::default();

        let fdc = FdcClientConfig {
            api_key: env::var("FDC_API_KEY").unwrap_or_default(),
            base_url: env::var("FDC_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl_secs: parse_or_default("HTTP_CACHE_TTL_SECS", defaults.cache_ttl_secs),
            rate_limit_per_minute: parse_or_default(
                "FDC_RATE_LIMIT_PER_MINUTE",
                defaults.rate_limit_per_minute,
            ),
        };

        Ok(Self {
            fdc,
            regional_base_url: env::var("REGIONAL_FOODS_BASE_URL").ok(),
            search_debounce_ms: parse_or_default("SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS),
        })
    }

    /// Debounce interval as a [`Duration`]
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Parse an environment variable, falling back to a default on absence or
/// malformed input
fn parse_or_default<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    env::var(key).map_or(default, |raw| {
        raw.parse().unwrap_or_else(|_| {
            warn!("Invalid value for {key}: {raw:?}, using default {default}");
            default
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.search_debounce_ms, 500);
        assert!(config.regional_base_url.is_none());
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_default_fdc_settings() {
        let config = TrackerConfig::default();
        assert_eq!(config.fdc.base_url, "https://api.nal.usda.gov/fdc/v1");
        assert_eq!(config.fdc.cache_ttl_secs, 86_400);
        assert_eq!(config.fdc.rate_limit_per_minute, 30);
    }
}
