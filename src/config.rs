//! Runtime configuration for endpoints and the demo fallback policy.
//!
//! Options deserialize from camelCase JSON (`refreshIntervalMs`,
//! `indexerEndpoint`, `priceEndpoint`, ...) and can be read from
//! `DASHBOARD_*` environment variables on native targets.

use crate::domain::chain::Chain;
use crate::error::SdkError;
use crate::network::{DEFAULT_PRICE_URL, DEMO_API_KEY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5 * 60 * 1000;
pub const DEFAULT_DEMO_CONNECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Price refresh interval.
    pub refresh_interval_ms: u64,
    /// Overrides the per-chain indexer base URL for every chain.
    pub indexer_endpoint: Option<String>,
    /// Indexer API key, appended to the base URL.
    pub indexer_api_key: String,
    pub price_endpoint: String,
    /// Substitute the fixed demo data set when the indexer is unreachable.
    pub demo_fallback: bool,
    /// Simulated connect latency when no wallet provider is present.
    pub demo_connect_delay_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            indexer_endpoint: None,
            indexer_api_key: DEMO_API_KEY.to_string(),
            price_endpoint: DEFAULT_PRICE_URL.to_string(),
            demo_fallback: true,
            demo_connect_delay_ms: DEFAULT_DEMO_CONNECT_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn demo_connect_delay(&self) -> Duration {
        Duration::from_millis(self.demo_connect_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Full indexer URL for `chain`, API key included.
    pub fn indexer_url(&self, chain: Chain) -> String {
        let base = self
            .indexer_endpoint
            .as_deref()
            .unwrap_or(chain.info().indexer_url);
        if base.ends_with('/') {
            format!("{}{}", base, self.indexer_api_key)
        } else {
            format!("{}/{}", base, self.indexer_api_key)
        }
    }

    /// Parse a JSON config document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `DASHBOARD_*` variables over the defaults.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SdkError> {
        let mut config = Self::default();

        if let Some(v) = lookup("DASHBOARD_REFRESH_INTERVAL_MS") {
            config.refresh_interval_ms = parse_env("DASHBOARD_REFRESH_INTERVAL_MS", &v)?;
        }
        if let Some(v) = lookup("DASHBOARD_INDEXER_ENDPOINT") {
            config.indexer_endpoint = Some(v);
        }
        if let Some(v) = lookup("DASHBOARD_INDEXER_API_KEY") {
            config.indexer_api_key = v;
        }
        if let Some(v) = lookup("DASHBOARD_PRICE_ENDPOINT") {
            config.price_endpoint = v;
        }
        if let Some(v) = lookup("DASHBOARD_DEMO_FALLBACK") {
            config.demo_fallback = parse_env("DASHBOARD_DEMO_FALLBACK", &v)?;
        }
        if let Some(v) = lookup("DASHBOARD_DEMO_CONNECT_DELAY_MS") {
            config.demo_connect_delay_ms = parse_env("DASHBOARD_DEMO_CONNECT_DELAY_MS", &v)?;
        }
        if let Some(v) = lookup("DASHBOARD_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = parse_env("DASHBOARD_REQUEST_TIMEOUT_MS", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.refresh_interval_ms == 0 {
            return Err(SdkError::Validation(
                "refreshIntervalMs must be greater than zero".to_string(),
            ));
        }
        if self.price_endpoint.trim().is_empty() {
            return Err(SdkError::Validation("priceEndpoint is empty".to_string()));
        }
        if matches!(&self.indexer_endpoint, Some(e) if e.trim().is_empty()) {
            return Err(SdkError::Validation("indexerEndpoint is empty".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SdkError> {
    value
        .trim()
        .parse()
        .map_err(|_| SdkError::Validation(format!("{} has an invalid value: {}", key, value)))
}
