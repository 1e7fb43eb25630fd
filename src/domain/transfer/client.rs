//! Transfers sub-client: aggregated activity history from the indexer.

use crate::client::DashboardClient;
use crate::domain::chain::Chain;
use crate::domain::price::PriceTable;
use crate::domain::transfer::wire::{
    AssetTransfersParams, AssetTransfersResult, GET_ASSET_TRANSFERS, MAX_TRANSFERS,
};
use crate::domain::transfer::{fallback, merge_recent, normalize, NormalizedTransaction, TaggedTransfer};
use crate::error::{AggregationError, HttpError};
use crate::http::rpc::{self, RpcErrorObject, RpcRequest, RpcResponse};
use crate::shared::Address;
use crate::wallet::provider::{self as wallet, WalletProvider};
use futures_util::future::{join, join_all};

type TransfersReply = Result<RpcResponse<AssetTransfersResult>, HttpError>;

pub struct Transfers<'a> {
    pub(crate) client: &'a DashboardClient,
    /// Source of authoritative block timestamps, when a wallet is on the queried chain.
    pub(crate) provider: Option<&'a dyn WalletProvider>,
}

impl<'a> Transfers<'a> {
    /// Up to ten most recent transfers touching `address` on `chain`, newest first.
    ///
    /// Transport failures yield the demo data set when `demoFallback` is on.
    /// Errors the indexer itself reports are always returned.
    pub async fn aggregate(
        &self,
        address: &Address,
        chain: Chain,
    ) -> Result<Vec<NormalizedTransaction>, AggregationError> {
        let url = self.client.config.indexer_url(chain);
        let (sent, received) = join(
            self.query(&url, AssetTransfersParams::sent_by(address)),
            self.query(&url, AssetTransfersParams::received_by(address)),
        )
        .await;

        if let Some(err) = service_error(&sent).or_else(|| service_error(&received)) {
            tracing::warn!(%chain, code = ?err.code, "Indexer reported an error: {}", err.message);
            return Err(into_service_error(err));
        }

        let tagged = match (sent, received) {
            (Ok(sent), Ok(received)) => merge_recent(
                sent.result.map(|r| r.transfers).unwrap_or_default(),
                received.result.map(|r| r.transfers).unwrap_or_default(),
                MAX_TRANSFERS,
            ),
            (Err(e), _) | (_, Err(e)) => {
                if !self.client.config.demo_fallback {
                    return Err(AggregationError::Transport(e));
                }
                tracing::warn!(%chain, error = %e, "Indexer unreachable, using demo data");
                fallback::demo_transfers(address)
            }
        };

        let prices = self.client.prices().cached().await;
        Ok(self.enrich(&tagged, chain, &prices).await)
    }

    /// One raw `alchemy_getAssetTransfers` call.
    pub async fn get_asset_transfers(
        &self,
        chain: Chain,
        params: AssetTransfersParams,
    ) -> Result<AssetTransfersResult, AggregationError> {
        let url = self.client.config.indexer_url(chain);
        let reply = self.query(&url, params).await;
        if let Some(err) = service_error(&reply) {
            return Err(into_service_error(err));
        }
        Ok(reply?.result.unwrap_or_default())
    }

    async fn query(&self, url: &str, params: AssetTransfersParams) -> TransfersReply {
        let request = RpcRequest::new(1, GET_ASSET_TRANSFERS, [params]);
        self.client
            .http
            .post(url, &request, &self.client.retry_policy)
            .await
    }

    async fn enrich(
        &self,
        tagged: &[TaggedTransfer],
        chain: Chain,
        prices: &PriceTable,
    ) -> Vec<NormalizedTransaction> {
        let timestamps = join_all(tagged.iter().map(|t| self.resolve_timestamp(t))).await;

        tagged
            .iter()
            .zip(timestamps)
            .map(|(t, ts)| normalize(t, chain, prices.get(t.raw.currency(chain)), ts))
            .collect()
    }

    /// Provider block lookup, then indexer metadata, then the current time.
    async fn resolve_timestamp(&self, t: &TaggedTransfer) -> i64 {
        if t.synthetic {
            return chrono::Utc::now().timestamp_millis();
        }
        if let Some(provider) = self.provider {
            match wallet::block_timestamp_ms(provider, &t.raw.block_num).await {
                Ok(ms) => return ms,
                Err(e) => tracing::debug!(
                    block = %t.raw.block_num,
                    error = %e,
                    "Block timestamp lookup failed"
                ),
            }
        }
        t.raw
            .metadata
            .as_ref()
            .and_then(|m| m.block_timestamp_ms)
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
    }
}

/// A JSON-RPC error carried either by a decoded reply or by a non-success body.
fn service_error(reply: &TransfersReply) -> Option<RpcErrorObject> {
    match reply {
        Ok(resp) => resp.error.clone(),
        Err(e) => e.body().and_then(rpc::error_from_body),
    }
}

fn into_service_error(err: RpcErrorObject) -> AggregationError {
    AggregationError::Service {
        code: err.code,
        message: if err.message.is_empty() {
            "indexer reported an error".to_string()
        } else {
            err.message
        },
    }
}
