//! Merge and normalization of raw indexer transfers.

use super::wire::RawTransfer;
use super::{Direction, NormalizedTransaction, TaggedTransfer, TxStatus};
use crate::domain::chain::Chain;
use crate::shared::fmt;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Tag both lists, order newest block first, drop repeated hashes and keep
/// the first `limit`.
///
/// The sort is stable and sent transfers are placed ahead of received ones, so
/// a self-transfer that shows up in both lists keeps its sent record.
pub fn merge_recent(
    sent: Vec<RawTransfer>,
    received: Vec<RawTransfer>,
    limit: usize,
) -> Vec<TaggedTransfer> {
    let mut merged: Vec<TaggedTransfer> = sent
        .into_iter()
        .map(|raw| TaggedTransfer::new(raw, Direction::Sent))
        .chain(
            received
                .into_iter()
                .map(|raw| TaggedTransfer::new(raw, Direction::Received)),
        )
        .collect();

    merged.sort_by_key(|t| Reverse(t.raw.block_number()));

    let mut seen = HashSet::new();
    merged.retain(|t| seen.insert(t.raw.hash.clone()));
    merged.truncate(limit);
    merged
}

/// Build the display record for a tagged transfer.
///
/// `price` is the USD price of the transfer's currency; zero yields `"0.00"`.
pub fn normalize(
    tagged: &TaggedTransfer,
    chain: Chain,
    price: f64,
    timestamp_ms: i64,
) -> NormalizedTransaction {
    let raw = &tagged.raw;
    let value = raw.value.unwrap_or(0.0);
    let counterparty = match tagged.direction {
        Direction::Sent => raw.to.clone().unwrap_or_default(),
        Direction::Received => raw.from.clone(),
    };

    NormalizedTransaction {
        hash: raw.hash.clone(),
        timestamp: timestamp_ms,
        direction: tagged.direction,
        amount: raw
            .value
            .map(fmt::num::amount_string)
            .unwrap_or_else(|| "0".to_string()),
        currency: raw.currency(chain).to_string(),
        usd_value: Some(fmt::usd_value(value, price)),
        counterparty,
        status: TxStatus::Confirmed,
        chain,
        block_num: raw.block_number(),
    }
}
