//! Wallet session manager.
//!
//! Drives the connect/disconnect lifecycle against an optional
//! [`WalletProvider`] and reports every change to the [`Store`]. Without a
//! provider, `connect` enters demo mode with a fixed address.

use super::provider::{self, methods, ListenerRegistration, ProviderEvent, WalletProvider};
use super::WalletSession;
use crate::domain::chain::Chain;
use crate::error::{ConnectError, ProviderError, SwitchNetworkError};
use crate::shared::{parse_quantity, Address};
use crate::store::{Action, Store};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Address adopted in demo mode.
pub const DEMO_ADDRESS: &str = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";
/// Chain id adopted in demo mode.
pub const DEMO_CHAIN_ID: &str = "1";

pub struct WalletSessionManager {
    provider: Option<Rc<dyn WalletProvider>>,
    store: Store,
    demo_connect_delay: Duration,
    registration: RefCell<Option<ListenerRegistration>>,
}

impl WalletSessionManager {
    pub fn new(
        provider: Option<Rc<dyn WalletProvider>>,
        store: Store,
        demo_connect_delay: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            demo_connect_delay,
            registration: RefCell::new(None),
        }
    }

    pub fn provider(&self) -> Option<&Rc<dyn WalletProvider>> {
        self.provider.as_ref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Request accounts and adopt the first one.
    pub async fn connect(&self) -> Result<WalletSession, ConnectError> {
        self.store.dispatch(Action::ConnectStarted);

        let result = match &self.provider {
            Some(p) => connect_with(p.as_ref()).await,
            None => {
                tracing::warn!("No wallet provider detected, using demo wallet");
                futures_timer::Delay::new(self.demo_connect_delay).await;
                Address::parse(DEMO_ADDRESS)
                    .map(|a| WalletSession::connected(a, Some(DEMO_CHAIN_ID.to_string())))
                    .map_err(|e| ConnectError::InvalidAccount(e.0))
            }
        };

        match &result {
            Ok(session) => {
                if let Some(address) = &session.address {
                    tracing::info!(%address, chain_id = ?session.chain_id, "Wallet connected");
                    self.store.dispatch(Action::SessionEstablished {
                        address: address.clone(),
                        chain_id: session.chain_id.clone(),
                    });
                }
            }
            Err(e) => {
                tracing::error!("Failed to connect wallet: {}", e);
                self.store.dispatch(Action::ConnectFailed(e.to_string()));
            }
        }
        result
    }

    pub fn disconnect(&self) {
        tracing::info!("Wallet disconnected");
        self.store.dispatch(Action::Disconnected);
    }

    /// Adopt an already-authorized account without prompting.
    ///
    /// Failures are logged only.
    pub async fn probe(&self) -> Option<WalletSession> {
        let p = self.provider.as_deref()?;
        let accounts = match provider::accounts(p, methods::ACCOUNTS).await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::error!("Failed to read wallet accounts: {}", e);
                return None;
            }
        };
        let address = match provider::first_address(&accounts)? {
            Ok(address) => address,
            Err(raw) => {
                tracing::warn!(account = %raw, "Wallet reported an invalid account");
                return None;
            }
        };
        let chain_id = match provider::chain_id(p).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Failed to read wallet chain id: {}", e);
                None
            }
        };

        tracing::info!(%address, "Restored wallet session");
        self.store.dispatch(Action::SessionEstablished {
            address: address.clone(),
            chain_id: chain_id.clone(),
        });
        Some(WalletSession::connected(address, chain_id))
    }

    /// Forward provider events to the store until [`detach`](Self::detach) or drop.
    pub fn attach(&self) {
        let Some(p) = &self.provider else {
            return;
        };
        if self.registration.borrow().is_some() {
            return;
        }

        let store = self.store.clone();
        let listener = Box::new(move |event: &ProviderEvent| apply_event(&store, event));
        *self.registration.borrow_mut() = Some(ListenerRegistration::register(p.clone(), listener));
    }

    pub fn detach(&self) {
        self.registration.borrow_mut().take();
    }

    pub fn is_attached(&self) -> bool {
        self.registration.borrow().is_some()
    }

    /// Ask the wallet to move to `chain`.
    pub async fn switch_network(&self, chain: Chain) -> Result<(), SwitchNetworkError> {
        let p = self
            .provider
            .as_deref()
            .ok_or(SwitchNetworkError::NoProvider)?;

        match provider::switch_chain(p, chain).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => {
                let info = chain.info();
                tracing::warn!(%chain, "Network not added to wallet");
                Err(SwitchNetworkError::ChainNotAdded {
                    chain_id: info.chain_id,
                    chain_name: info.name.to_string(),
                })
            }
            Err(e) => {
                tracing::error!(%chain, "Failed to switch network: {}", e);
                Err(SwitchNetworkError::Provider(e))
            }
        }
    }

    /// Timestamp of a block on the wallet's current chain, in epoch milliseconds.
    pub async fn block_timestamp_ms(&self, block: &str) -> Result<i64, ProviderError> {
        let p = self
            .provider
            .as_deref()
            .ok_or_else(|| ProviderError::new(ProviderError::DISCONNECTED, "No wallet provider"))?;
        provider::block_timestamp_ms(p, block).await
    }
}

async fn connect_with(p: &dyn WalletProvider) -> Result<WalletSession, ConnectError> {
    let accounts = provider::accounts(p, methods::REQUEST_ACCOUNTS).await?;
    let address = match provider::first_address(&accounts) {
        Some(Ok(address)) => address,
        Some(Err(raw)) => return Err(ConnectError::InvalidAccount(raw)),
        None => return Err(ConnectError::NoAccounts),
    };
    let chain_id = match provider::chain_id(p).await {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("Connected without a chain id: {}", e);
            None
        }
    };
    Ok(WalletSession::connected(address, chain_id))
}

fn apply_event(store: &Store, event: &ProviderEvent) {
    match event {
        ProviderEvent::AccountsChanged(accounts) => match provider::first_address(accounts) {
            Some(Ok(address)) => {
                tracing::info!(%address, "Wallet account changed");
                store.dispatch(Action::AccountChanged(address));
            }
            Some(Err(raw)) => tracing::warn!(account = %raw, "Ignoring invalid account"),
            None => {
                tracing::info!("Wallet disconnected by provider");
                store.dispatch(Action::Disconnected);
            }
        },
        ProviderEvent::ChainChanged(hex) => match parse_quantity(hex) {
            Some(id) => {
                store.dispatch(Action::ChainIdChanged(id.to_string()));
            }
            None => tracing::warn!(chain_id = %hex, "Ignoring malformed chain id"),
        },
    }
}
