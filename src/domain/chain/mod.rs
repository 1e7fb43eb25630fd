//! Chain domain: the static registry of supported networks.
//!
//! Read-only; indexed by [`Chain`] and by numeric chain id.

use crate::network::{ALCHEMY_ARBITRUM_URL, ALCHEMY_ETHEREUM_URL, ALCHEMY_POLYGON_URL};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Ethereum,
    Polygon,
    Arbitrum,
}

/// Registry entry for a [`Chain`].
#[derive(Debug, Clone, Serialize)]
pub struct ChainInfo {
    pub chain: Chain,
    pub name: &'static str,
    pub chain_id: u64,
    /// Symbol the indexer reports for native transfers.
    pub native_symbol: &'static str,
    /// Public RPC URL (demo key) offered to wallets.
    pub rpc_url: &'static str,
    /// Indexer base URL; the API key is appended.
    pub indexer_url: &'static str,
    pub explorer_url: &'static str,
}

pub const ETHEREUM: ChainInfo = ChainInfo {
    chain: Chain::Ethereum,
    name: "Ethereum",
    chain_id: 1,
    native_symbol: "ETH",
    rpc_url: "https://eth-mainnet.g.alchemy.com/v2/demo",
    indexer_url: ALCHEMY_ETHEREUM_URL,
    explorer_url: "https://etherscan.io",
};

pub const POLYGON: ChainInfo = ChainInfo {
    chain: Chain::Polygon,
    name: "Polygon",
    chain_id: 137,
    native_symbol: "MATIC",
    rpc_url: "https://polygon-mainnet.g.alchemy.com/v2/demo",
    indexer_url: ALCHEMY_POLYGON_URL,
    explorer_url: "https://polygonscan.com",
};

pub const ARBITRUM: ChainInfo = ChainInfo {
    chain: Chain::Arbitrum,
    name: "Arbitrum",
    chain_id: 42161,
    native_symbol: "ETH",
    rpc_url: "https://arb-mainnet.g.alchemy.com/v2/demo",
    indexer_url: ALCHEMY_ARBITRUM_URL,
    explorer_url: "https://arbiscan.io",
};

const REGISTRY: &[&ChainInfo] = &[&ETHEREUM, &POLYGON, &ARBITRUM];

impl Chain {
    /// Every supported chain, in display order.
    pub const ALL: [Chain; 3] = [Chain::Ethereum, Chain::Polygon, Chain::Arbitrum];

    pub fn info(&self) -> &'static ChainInfo {
        match self {
            Chain::Ethereum => &ETHEREUM,
            Chain::Polygon => &POLYGON,
            Chain::Arbitrum => &ARBITRUM,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::Arbitrum => "arbitrum",
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.info().chain_id
    }

    /// Chain id as a `0x`-prefixed hex quantity, the form wallets expect.
    pub fn hex_chain_id(&self) -> String {
        crate::shared::to_quantity(self.chain_id())
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Chain> {
        ChainInfo::by_chain_id(chain_id).map(|info| info.chain)
    }

    /// Whether a wallet-reported chain id (decimal or hex) designates this chain.
    pub fn matches_chain_id(&self, chain_id: &str) -> bool {
        crate::shared::parse_quantity(chain_id) == Some(self.chain_id())
    }
}

impl ChainInfo {
    pub fn by_chain_id(chain_id: u64) -> Option<&'static ChainInfo> {
        REGISTRY.iter().find(|c| c.chain_id == chain_id).copied()
    }

    pub fn all() -> Vec<&'static ChainInfo> {
        REGISTRY.to_vec()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chain name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported chain: {0}")]
pub struct UnknownChain(pub String);

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" => Ok(Chain::Ethereum),
            "polygon" => Ok(Chain::Polygon),
            "arbitrum" => Ok(Chain::Arbitrum),
            other => Err(UnknownChain(other.to_string())),
        }
    }
}
