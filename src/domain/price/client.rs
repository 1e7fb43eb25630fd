//! Prices sub-client: USD price table with a shared cache.

use crate::client::DashboardClient;
use crate::domain::price::wire::SimplePriceResponse;
use crate::domain::price::{PriceTable, TrackedAsset};
use futures_util::Stream;
use std::time::Duration;

pub struct Prices<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Prices<'a> {
    /// Fetch the current table. Never fails: any problem yields all zeros.
    pub async fn fetch(&self) -> PriceTable {
        let url = self.url();
        let resp: Result<SimplePriceResponse, _> = self
            .client
            .http
            .get(&url, &self.client.retry_policy)
            .await;

        let table = match resp {
            Ok(resp) => PriceTable::try_from(resp),
            Err(e) => Err(e.to_string()),
        };
        table.unwrap_or_else(|reason| {
            tracing::error!("Failed to fetch prices: {}", reason);
            PriceTable::zeroed()
        })
    }

    /// Fetch and store into the client cache read by the aggregator.
    pub async fn refresh(&self) -> PriceTable {
        let table = self.fetch().await;
        *self.client.price_cache.write().await = table.clone();
        table
    }

    /// Last table stored by [`refresh`](Self::refresh); all zeros before the first one.
    pub async fn cached(&self) -> PriceTable {
        self.client.price_cache.read().await.clone()
    }

    /// Refresh immediately, then once per `interval`, forever.
    ///
    /// Dropping the stream stops polling.
    pub fn watch(&self, interval: Duration) -> impl Stream<Item = PriceTable> + 'a {
        let prices = Prices {
            client: self.client,
        };
        async_stream::stream! {
            loop {
                yield prices.refresh().await;
                futures_timer::Delay::new(interval).await;
            }
        }
    }

    fn url(&self) -> String {
        let ids: Vec<_> = TrackedAsset::ALL
            .iter()
            .map(|a| urlencoding::encode(a.price_id()))
            .collect();
        format!(
            "{}?ids={}&vs_currencies=usd",
            self.client.config.price_endpoint,
            ids.join(",")
        )
    }
}
