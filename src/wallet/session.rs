//! Wallet session value.

use crate::domain::chain::Chain;
use crate::shared::Address;
use serde::{Deserialize, Serialize};

/// Address, connection flag and chain id of the connected wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: Option<Address>,
    pub connected: bool,
    /// Decimal chain id reported by the wallet, e.g. `"137"`.
    pub chain_id: Option<String>,
}

impl WalletSession {
    pub fn connected(address: Address, chain_id: Option<String>) -> Self {
        Self {
            address: Some(address),
            connected: true,
            chain_id,
        }
    }

    /// Registry chain the wallet is on, if supported.
    pub fn chain(&self) -> Option<Chain> {
        self.chain_id
            .as_deref()
            .and_then(crate::shared::parse_quantity)
            .and_then(Chain::from_chain_id)
    }

    pub fn is_on(&self, chain: Chain) -> bool {
        self.chain_id
            .as_deref()
            .is_some_and(|id| chain.matches_chain_id(id))
    }
}

/// Connected, and the wallet reports a chain other than `selected`.
///
/// An unknown wallet chain id is not treated as wrong.
pub fn is_wallet_on_wrong_chain(session: &WalletSession, selected: Chain) -> bool {
    session.connected && session.chain_id.is_some() && !session.is_on(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(chain_id: Option<&str>) -> WalletSession {
        WalletSession::connected(
            Address::parse("0x71c7656ec7ab88b098defb751b7401b5f6d8976f").unwrap(),
            chain_id.map(str::to_string),
        )
    }

    #[test]
    fn test_wrong_chain() {
        assert!(!is_wallet_on_wrong_chain(&session(Some("1")), Chain::Ethereum));
        assert!(is_wallet_on_wrong_chain(&session(Some("137")), Chain::Ethereum));
        assert!(!is_wallet_on_wrong_chain(&session(None), Chain::Polygon));
        assert!(!is_wallet_on_wrong_chain(&WalletSession::default(), Chain::Polygon));
    }

    #[test]
    fn test_chain_lookup() {
        assert_eq!(session(Some("42161")).chain(), Some(Chain::Arbitrum));
        assert_eq!(session(Some("10")).chain(), None);
    }
}
