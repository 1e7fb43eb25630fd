//! High-level client: `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::config::DashboardConfig;
use crate::domain::price::client::Prices;
use crate::domain::price::PriceTable;
use crate::domain::transfer::client::Transfers;
use crate::error::SdkError;
use crate::http::{DashboardHttp, RetryPolicy};
use crate::wallet::WalletProvider;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::price::client::Prices as PricesClient;
pub use crate::domain::transfer::client::Transfers as TransfersClient;

/// Entry point for indexer and price queries.
///
/// Cheap to clone; clones share the price cache.
#[derive(Clone)]
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
    pub(crate) config: DashboardConfig,
    pub(crate) retry_policy: RetryPolicy,
    /// Last fetched price table, read by the aggregator.
    pub(crate) price_cache: Arc<RwLock<PriceTable>>,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn transfers(&self) -> Transfers<'_> {
        Transfers {
            client: self,
            provider: None,
        }
    }

    /// Transfers sub-client that reads block timestamps from `provider`.
    ///
    /// Only pass a provider connected to the chain being queried.
    pub fn transfers_with<'a>(&'a self, provider: &'a dyn WalletProvider) -> Transfers<'a> {
        Transfers {
            client: self,
            provider: Some(provider),
        }
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Reset the price cache to all zeros.
    pub async fn clear_all_caches(&self) {
        *self.price_cache.write().await = PriceTable::zeroed();
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct DashboardClientBuilder {
    config: DashboardConfig,
    retry_policy: RetryPolicy,
}

impl DashboardClientBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Base URL used for every chain instead of the registry URLs.
    pub fn indexer_endpoint(mut self, url: &str) -> Self {
        self.config.indexer_endpoint = Some(url.to_string());
        self
    }

    pub fn indexer_api_key(mut self, key: &str) -> Self {
        self.config.indexer_api_key = key.to_string();
        self
    }

    pub fn price_endpoint(mut self, url: &str) -> Self {
        self.config.price_endpoint = url.to_string();
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn demo_fallback(mut self, enabled: bool) -> Self {
        self.config.demo_fallback = enabled;
        self
    }

    pub fn demo_connect_delay(mut self, delay: Duration) -> Self {
        self.config.demo_connect_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Retry policy for indexer and price requests. Defaults to no retries.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<DashboardClient, SdkError> {
        self.config.validate()?;
        Ok(DashboardClient {
            http: DashboardHttp::new(self.config.request_timeout())?,
            config: self.config,
            retry_policy: self.retry_policy,
            price_cache: Arc::new(RwLock::new(PriceTable::zeroed())),
        })
    }
}
