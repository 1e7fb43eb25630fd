//! EIP-1193 provider seam.
//!
//! [`WalletProvider`] is the only surface the rest of the crate sees of an
//! injected wallet. Requests are JSON-in/JSON-out; events are delivered to
//! registered listeners. Futures are `?Send` so browser-backed providers can
//! hold `JsValue`s.

use crate::domain::chain::Chain;
use crate::error::ProviderError;
use crate::shared::{parse_quantity, Address};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::rc::Rc;

/// Provider method names.
pub mod methods {
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ACCOUNTS: &str = "eth_accounts";
    pub const CHAIN_ID: &str = "eth_chainId";
    pub const GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
    pub const SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
}

/// Event emitted by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New account list; empty when the wallet locked or revoked access.
    AccountsChanged(Vec<String>),
    /// New chain id as a hex quantity.
    ChainChanged(String),
}

pub type EventListener = Box<dyn Fn(&ProviderEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[async_trait(?Send)]
pub trait WalletProvider {
    /// Issue a JSON-RPC request; `params` is the positional parameter array.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    fn add_listener(&self, listener: EventListener) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);
}

/// Keeps a listener registered until dropped or [`release`](Self::release)d.
pub struct ListenerRegistration {
    provider: Rc<dyn WalletProvider>,
    id: Option<ListenerId>,
}

impl ListenerRegistration {
    pub fn register(provider: Rc<dyn WalletProvider>, listener: EventListener) -> Self {
        let id = provider.add_listener(listener);
        Self {
            provider,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.provider.remove_listener(id);
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("id", &self.id)
            .finish()
    }
}

// ─── Typed helpers ───────────────────────────────────────────────────────────

/// `eth_requestAccounts` or `eth_accounts`, decoded to strings.
pub async fn accounts(
    provider: &dyn WalletProvider,
    method: &str,
) -> Result<Vec<String>, ProviderError> {
    let value = provider.request(method, json!([])).await?;
    serde_json::from_value(value)
        .map_err(|e| ProviderError::internal(format!("malformed {} result: {}", method, e)))
}

/// `eth_chainId` as a decimal string (`"0x89"` → `"137"`).
pub async fn chain_id(provider: &dyn WalletProvider) -> Result<String, ProviderError> {
    let value = provider.request(methods::CHAIN_ID, json!([])).await?;
    value
        .as_str()
        .and_then(parse_quantity)
        .map(|id| id.to_string())
        .ok_or_else(|| ProviderError::internal(format!("malformed chain id: {}", value)))
}

/// Timestamp of block `block` (hex quantity) in epoch milliseconds.
pub async fn block_timestamp_ms(
    provider: &dyn WalletProvider,
    block: &str,
) -> Result<i64, ProviderError> {
    let value = provider
        .request(methods::GET_BLOCK_BY_NUMBER, json!([block, false]))
        .await?;
    if value.is_null() {
        return Err(ProviderError::internal(format!("block {} not found", block)));
    }
    let no_timestamp = || ProviderError::internal(format!("block {} has no timestamp", block));
    let header: BlockHeader = serde_json::from_value(value).map_err(|_| no_timestamp())?;
    i64::try_from(header.timestamp)
        .ok()
        .and_then(|secs| secs.checked_mul(1000))
        .ok_or_else(no_timestamp)
}

/// The part of an `eth_getBlockByNumber` result the aggregator reads.
#[derive(Deserialize)]
struct BlockHeader {
    #[serde(with = "crate::shared::serde_util::hex_u64")]
    timestamp: u64,
}

/// `wallet_switchEthereumChain` to `chain`.
pub async fn switch_chain(provider: &dyn WalletProvider, chain: Chain) -> Result<(), ProviderError> {
    provider
        .request(
            methods::SWITCH_CHAIN,
            json!([{ "chainId": chain.hex_chain_id() }]),
        )
        .await
        .map(|_| ())
}

/// First account of a list, if it is a valid address.
pub fn first_address(accounts: &[String]) -> Option<Result<Address, String>> {
    accounts
        .first()
        .map(|a| Address::parse(a).map_err(|_| a.clone()))
}
