//! Price domain: USD quotes for the native assets of the supported chains.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An asset whose USD price is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackedAsset {
    Eth,
    Matic,
    Arb,
}

impl TrackedAsset {
    pub const ALL: [TrackedAsset; 3] = [TrackedAsset::Eth, TrackedAsset::Matic, TrackedAsset::Arb];

    pub fn symbol(&self) -> &'static str {
        match self {
            TrackedAsset::Eth => "ETH",
            TrackedAsset::Matic => "MATIC",
            TrackedAsset::Arb => "ARB",
        }
    }

    /// CoinGecko asset id.
    pub fn price_id(&self) -> &'static str {
        match self {
            TrackedAsset::Eth => "ethereum",
            TrackedAsset::Matic => "matic-network",
            TrackedAsset::Arb => "arbitrum",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<TrackedAsset> {
        Self::ALL
            .into_iter()
            .find(|a| a.symbol().eq_ignore_ascii_case(symbol.trim()))
    }
}

/// Symbol → USD price. Always holds exactly the tracked assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: BTreeMap<TrackedAsset, f64>,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl PriceTable {
    /// Every tracked asset at `0`.
    pub fn zeroed() -> Self {
        Self {
            prices: TrackedAsset::ALL.into_iter().map(|a| (a, 0.0)).collect(),
        }
    }

    /// Price of `symbol` (case-insensitive); `0` for untracked symbols.
    pub fn get(&self, symbol: &str) -> f64 {
        TrackedAsset::from_symbol(symbol)
            .and_then(|a| self.prices.get(&a).copied())
            .unwrap_or(0.0)
    }

    pub fn price(&self, asset: TrackedAsset) -> f64 {
        self.prices.get(&asset).copied().unwrap_or(0.0)
    }

    pub fn is_zeroed(&self) -> bool {
        self.prices.values().all(|p| *p == 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackedAsset, f64)> + '_ {
        self.prices.iter().map(|(a, p)| (*a, *p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_has_exactly_tracked_symbols() {
        let table = PriceTable::zeroed();
        let symbols: Vec<_> = table.iter().map(|(a, _)| a.symbol()).collect();
        assert_eq!(symbols, vec!["ETH", "MATIC", "ARB"]);
        assert!(table.is_zeroed());
    }

    #[test]
    fn test_get_unknown_symbol_is_zero() {
        assert_eq!(PriceTable::zeroed().get("USDC"), 0.0);
        assert_eq!(TrackedAsset::from_symbol("eth"), Some(TrackedAsset::Eth));
    }

    #[test]
    fn test_serializes_as_symbol_map() {
        let json = serde_json::to_value(PriceTable::zeroed()).unwrap();
        assert_eq!(json, serde_json::json!({"ETH": 0.0, "MATIC": 0.0, "ARB": 0.0}));
    }
}
