//! Transfer domain: cross-chain activity history for one address.
//!
//! The indexer is queried twice per load (sent and received). Results are
//! merged, ordered newest first, deduplicated by hash and capped at
//! [`wire::MAX_TRANSFERS`] before being normalized into
//! [`NormalizedTransaction`] records.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod fallback;
pub mod wire;

use crate::domain::chain::Chain;
use crate::shared::fmt;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub use convert::{merge_recent, normalize};
pub use wire::RawTransfer;

/// Which side of the transfer the queried address was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    /// `-` for sent, `+` for received.
    pub fn sign(&self) -> &'static str {
        match self {
            Direction::Sent => "-",
            Direction::Received => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

/// A transfer in display-ready form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransaction {
    pub hash: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub direction: Direction,
    /// Decimal string of the human-unit value, `"0"` when the indexer reports none.
    pub amount: String,
    pub currency: String,
    /// `amount × price` with 2 decimals; `None` when not computed.
    pub usd_value: Option<String>,
    /// Recipient for sent transfers, sender for received ones.
    pub counterparty: String,
    pub status: TxStatus,
    pub chain: Chain,
    pub block_num: u64,
}

impl NormalizedTransaction {
    pub fn datetime(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_default()
    }

    /// `"-0.5000 ETH"` / `"+100.0000 USDC"`.
    pub fn display_amount(&self) -> String {
        let amount = fmt::decimal::parse(&self.amount)
            .map(|d| fmt::fixed(&d, 4))
            .unwrap_or_else(|| self.amount.clone());
        format!("{}{} {}", self.direction.sign(), amount, self.currency)
    }

    /// `"$1,250.00"`, or `None` when no USD value was computed.
    pub fn display_usd(&self) -> Option<String> {
        self.usd_value.as_deref().map(fmt::usd_display)
    }

    pub fn short_counterparty(&self) -> String {
        fmt::shorten(&self.counterparty)
    }

    pub fn explorer_url(&self) -> String {
        format!("{}/tx/{}", self.chain.info().explorer_url, self.hash)
    }
}

/// A raw transfer tagged with its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTransfer {
    pub raw: RawTransfer,
    pub direction: Direction,
    /// Demo data; never looked up on chain.
    pub synthetic: bool,
}

impl TaggedTransfer {
    pub fn new(raw: RawTransfer, direction: Direction) -> Self {
        Self {
            raw,
            direction,
            synthetic: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NormalizedTransaction {
        NormalizedTransaction {
            hash: "0xabc".to_string(),
            timestamp: 1_705_314_600_000,
            direction: Direction::Sent,
            amount: "0.5".to_string(),
            currency: "ETH".to_string(),
            usd_value: Some("1250.00".to_string()),
            counterparty: "0x71c7656ec7ab88b098defb751b7401b5f6d8976f".to_string(),
            status: TxStatus::Confirmed,
            chain: Chain::Ethereum,
            block_num: 4096,
        }
    }

    #[test]
    fn test_display_helpers() {
        let tx = sample();
        assert_eq!(tx.display_amount(), "-0.5000 ETH");
        assert_eq!(tx.display_usd().as_deref(), Some("$1,250.00"));
        assert_eq!(tx.short_counterparty(), "0x71c7...976f");
        assert_eq!(tx.explorer_url(), "https://etherscan.io/tx/0xabc");
        assert_eq!(tx.datetime().timestamp(), 1_705_314_600);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["usdValue"], "1250.00");
        assert_eq!(json["direction"], "sent");
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["blockNum"], 4096);
    }
}
