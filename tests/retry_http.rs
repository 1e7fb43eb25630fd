//! Opt-in retry policy against a loopback stub.

mod common;

use common::{rpc_result, transfer, StubServer, ACCOUNT, OTHER};
use crosschain_activity_sdk::domain::transfer::wire::AssetTransfersParams;
use crosschain_activity_sdk::error::HttpError;
use crosschain_activity_sdk::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::Custom(RetryConfig {
        max_retries,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_factor: 2.0,
        jitter: false,
        retryable_statuses: vec![429, 502, 503, 504],
    })
}

fn client_for(server: &StubServer, policy: RetryPolicy) -> DashboardClient {
    DashboardClient::builder()
        .indexer_endpoint(&server.indexer_base())
        .price_endpoint(&server.price_endpoint())
        .demo_fallback(false)
        .retry_policy(policy)
        .build()
        .unwrap()
}

fn params() -> AssetTransfersParams {
    AssetTransfersParams::sent_by(&Address::parse(ACCOUNT).unwrap())
}

#[tokio::test]
async fn test_retries_past_unavailable_status() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let server = StubServer::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (503, "unavailable".to_string())
        } else {
            (
                200,
                rpc_result(vec![transfer("0xa", "0x10", ACCOUNT, OTHER, 1.0, "ETH")]),
            )
        }
    })
    .await;

    let result = client_for(&server, fast_retries(2))
        .transfers()
        .get_asset_transfers(Chain::Ethereum, params())
        .await
        .unwrap();

    assert_eq!(result.transfers.len(), 1);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let server = StubServer::start(|_| (503, "unavailable".to_string())).await;

    let err = client_for(&server, fast_retries(2))
        .transfers()
        .get_asset_transfers(Chain::Ethereum, params())
        .await
        .unwrap_err();

    match err {
        AggregationError::Transport(HttpError::MaxRetriesExceeded { attempts, .. }) => {
            assert_eq!(attempts, 3)
        }
        other => panic!("expected exhausted retries, got {other:?}"),
    }
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_non_retryable_status_fails_once() {
    let server = StubServer::start(|_| (500, "boom".to_string())).await;

    let err = client_for(&server, fast_retries(3))
        .transfers()
        .get_asset_transfers(Chain::Ethereum, params())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregationError::Transport(HttpError::ServerError { status: 500, .. })
    ));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_default_policy_is_single_attempt() {
    let server = StubServer::start(|_| (503, "unavailable".to_string())).await;

    let err = client_for(&server, RetryPolicy::default())
        .transfers()
        .get_asset_transfers(Chain::Ethereum, params())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregationError::Transport(HttpError::ServerError { status: 503, .. })
    ));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_price_fetch_retries_rate_limit() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let server = StubServer::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (429, "{}".to_string())
        } else {
            (200, common::prices_body())
        }
    })
    .await;

    let table = client_for(&server, fast_retries(1)).prices().fetch().await;

    assert_eq!(table.get("ETH"), 2000.0);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
