//! In-process wallet provider for tests and headless use.

use super::provider::{methods, EventListener, ListenerId, ProviderEvent, WalletProvider};
use crate::error::ProviderError;
use crate::shared::{parse_quantity, to_quantity};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct WalletState {
    accounts: Vec<String>,
    authorized: bool,
    chain_id: u64,
    known_chains: HashSet<u64>,
    /// block number → timestamp (seconds)
    blocks: HashMap<u64, u64>,
    reject_with: Option<ProviderError>,
    calls: Vec<String>,
}

/// A scriptable EIP-1193 wallet.
///
/// Accounts are only exposed through `eth_accounts` after a successful
/// `eth_requestAccounts` (or [`authorize`](Self::authorize)), like a real
/// wallet. Switching to a chain not in the known set fails with code 4902.
pub struct InMemoryProvider {
    state: RefCell<WalletState>,
    listeners: RefCell<Vec<(ListenerId, EventListener)>>,
    next_id: Cell<u64>,
}

impl InMemoryProvider {
    pub fn new(accounts: Vec<String>, chain_id: u64) -> Self {
        let state = WalletState {
            accounts,
            chain_id,
            known_chains: [chain_id].into_iter().collect(),
            ..Default::default()
        };
        Self {
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Mark the accounts as already authorized for this origin.
    pub fn authorize(self) -> Self {
        self.state.borrow_mut().authorized = true;
        self
    }

    pub fn with_known_chains(self, chain_ids: impl IntoIterator<Item = u64>) -> Self {
        self.state.borrow_mut().known_chains.extend(chain_ids);
        self
    }

    pub fn with_block(self, number: u64, timestamp_secs: u64) -> Self {
        self.state.borrow_mut().blocks.insert(number, timestamp_secs);
        self
    }

    /// Fail every subsequent `eth_requestAccounts` with `error`; `None` clears it.
    pub fn reject_requests(&self, error: Option<ProviderError>) {
        self.state.borrow_mut().reject_with = error;
    }

    /// Replace the account list and notify listeners.
    pub fn set_accounts(&self, accounts: Vec<String>) {
        self.state.borrow_mut().accounts = accounts.clone();
        self.emit(&ProviderEvent::AccountsChanged(accounts));
    }

    /// Move the wallet to `chain_id` and notify listeners.
    pub fn set_chain(&self, chain_id: u64) {
        {
            let mut state = self.state.borrow_mut();
            state.chain_id = chain_id;
            state.known_chains.insert(chain_id);
        }
        self.emit(&ProviderEvent::ChainChanged(to_quantity(chain_id)));
    }

    pub fn chain_id(&self) -> u64 {
        self.state.borrow().chain_id
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Methods requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn emit(&self, event: &ProviderEvent) {
        for (_, listener) in self.listeners.borrow().iter() {
            listener(event);
        }
    }

    fn switch(&self, params: &Value) -> Result<Value, ProviderError> {
        let requested = params
            .get(0)
            .and_then(|p| p.get("chainId"))
            .and_then(Value::as_str)
            .and_then(parse_quantity)
            .ok_or_else(|| ProviderError::new(-32602, "Invalid chainId"))?;

        if !self.state.borrow().known_chains.contains(&requested) {
            return Err(ProviderError::new(
                ProviderError::UNRECOGNIZED_CHAIN,
                format!("Unrecognized chain ID \"{}\"", to_quantity(requested)),
            ));
        }
        if self.chain_id() != requested {
            self.set_chain(requested);
        }
        Ok(Value::Null)
    }
}

#[async_trait(?Send)]
impl WalletProvider for InMemoryProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.state.borrow_mut().calls.push(method.to_string());

        match method {
            methods::REQUEST_ACCOUNTS => {
                let mut state = self.state.borrow_mut();
                if let Some(err) = state.reject_with.clone() {
                    return Err(err);
                }
                state.authorized = true;
                Ok(json!(state.accounts))
            }
            methods::ACCOUNTS => {
                let state = self.state.borrow();
                if state.authorized {
                    Ok(json!(state.accounts))
                } else {
                    Ok(json!([]))
                }
            }
            methods::CHAIN_ID => Ok(json!(to_quantity(self.chain_id()))),
            methods::GET_BLOCK_BY_NUMBER => {
                let number = params
                    .get(0)
                    .and_then(Value::as_str)
                    .and_then(parse_quantity);
                let state = self.state.borrow();
                Ok(match number.and_then(|n| state.blocks.get(&n).map(|ts| (n, *ts))) {
                    Some((n, ts)) => json!({
                        "number": to_quantity(n),
                        "timestamp": to_quantity(ts),
                    }),
                    None => Value::Null,
                })
            }
            methods::SWITCH_CHAIN => self.switch(&params),
            other => Err(ProviderError::new(
                ProviderError::UNSUPPORTED_METHOD,
                format!("Method {} is not supported", other),
            )),
        }
    }

    fn add_listener(&self, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::provider::{accounts, block_timestamp_ms, chain_id};
    use std::rc::Rc;

    const ACCOUNT: &str = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";

    #[tokio::test]
    async fn test_accounts_hidden_until_requested() {
        let provider = InMemoryProvider::new(vec![ACCOUNT.to_string()], 1);
        assert!(accounts(&provider, methods::ACCOUNTS).await.unwrap().is_empty());
        let granted = accounts(&provider, methods::REQUEST_ACCOUNTS).await.unwrap();
        assert_eq!(granted, vec![ACCOUNT.to_string()]);
        assert_eq!(accounts(&provider, methods::ACCOUNTS).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_chain_id_decimal() {
        let provider = InMemoryProvider::new(vec![], 137);
        assert_eq!(chain_id(&provider).await.unwrap(), "137");
    }

    #[tokio::test]
    async fn test_block_timestamp() {
        let provider = InMemoryProvider::new(vec![], 1).with_block(0x1000, 1_705_314_668);
        assert_eq!(
            block_timestamp_ms(&provider, "0x1000").await.unwrap(),
            1_705_314_668_000
        );
        assert!(block_timestamp_ms(&provider, "0x1001").await.is_err());
    }

    #[tokio::test]
    async fn test_switch_unknown_chain_is_4902() {
        let provider = InMemoryProvider::new(vec![], 1);
        let err = provider
            .request(methods::SWITCH_CHAIN, json!([{"chainId": "0xa4b1"}]))
            .await
            .unwrap_err();
        assert!(err.is_unrecognized_chain());
    }

    #[test]
    fn test_listeners_receive_events_until_removed() {
        let provider = InMemoryProvider::new(vec![], 1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = provider.add_listener(Box::new(move |e| sink.borrow_mut().push(e.clone())));

        provider.set_chain(137);
        provider.remove_listener(id);
        provider.set_chain(1);

        assert_eq!(
            *seen.borrow(),
            vec![ProviderEvent::ChainChanged("0x89".to_string())]
        );
        assert_eq!(provider.listener_count(), 0);
    }
}
