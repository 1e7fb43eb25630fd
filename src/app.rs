//! Composition root: `Dashboard` wires the client, wallet manager and store.
//!
//! A UI layer owns one `Dashboard`, renders [`Store::snapshot`], and calls the
//! async operations below in response to user input. History loads and price
//! polling run independently; superseded history results are discarded by the
//! store's generation check.

use crate::client::DashboardClient;
use crate::domain::chain::Chain;
use crate::domain::price::PriceTable;
use crate::error::{ConnectError, SwitchNetworkError};
use crate::store::persist::PreferenceStore;
use crate::store::{Action, AppState, Store};
use crate::wallet::{WalletProvider, WalletSession, WalletSessionManager};
use futures_util::StreamExt;
use std::rc::Rc;

pub struct Dashboard {
    client: DashboardClient,
    store: Store,
    wallet: WalletSessionManager,
}

impl Dashboard {
    pub fn new(
        client: DashboardClient,
        provider: Option<Rc<dyn WalletProvider>>,
        preferences: Option<Rc<dyn PreferenceStore>>,
    ) -> Self {
        let store = match preferences {
            Some(preferences) => Store::with_preferences(preferences),
            None => Store::default(),
        };
        let wallet = WalletSessionManager::new(
            provider,
            store.clone(),
            client.config().demo_connect_delay(),
        );
        Self {
            client,
            store,
            wallet,
        }
    }

    pub fn client(&self) -> &DashboardClient {
        &self.client
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn wallet(&self) -> &WalletSessionManager {
        &self.wallet
    }

    pub fn state(&self) -> AppState {
        self.store.snapshot()
    }

    /// Attach to the wallet and restore an authorized session, then fetch
    /// prices and load its history.
    pub async fn mount(&self) {
        self.wallet.attach();
        self.wallet.probe().await;
        self.refresh_prices().await;
        self.load_history().await;
    }

    /// Stop listening to wallet events.
    pub fn unmount(&self) {
        self.wallet.detach();
    }

    pub async fn connect(&self) -> Result<WalletSession, ConnectError> {
        let session = self.wallet.connect().await?;
        self.load_history().await;
        Ok(session)
    }

    pub fn disconnect(&self) {
        self.wallet.disconnect();
    }

    pub async fn select_chain(&self, chain: Chain) {
        self.store.dispatch(Action::SelectChain(chain));
        self.load_history().await;
    }

    /// Reload history if the account or selected chain changed since the last load.
    pub async fn sync(&self) {
        if self.store.select(AppState::history_is_stale) {
            self.load_history().await;
        }
    }

    /// Load history for the current address and selected chain.
    ///
    /// Without an address the list is cleared instead.
    pub async fn load_history(&self) {
        let state = self.store.snapshot();
        let Some(address) = state.session.address.clone() else {
            self.store.dispatch(Action::HistoryCleared);
            return;
        };
        let chain = state.selected_chain;

        let generation = self
            .store
            .dispatch(Action::HistoryRequested {
                address: address.clone(),
                chain,
            })
            .history_generation;

        let provider = self
            .wallet
            .provider()
            .filter(|_| state.session.is_on(chain));
        let transfers = match provider {
            Some(p) => self.client.transfers_with(&**p),
            None => self.client.transfers(),
        };

        match transfers.aggregate(&address, chain).await {
            Ok(transactions) => {
                tracing::debug!(%chain, count = transactions.len(), "History loaded");
                self.store.dispatch(Action::HistoryLoaded {
                    generation,
                    transactions,
                });
            }
            Err(e) => {
                tracing::error!(%chain, "Failed to load history: {}", e);
                self.store.dispatch(Action::HistoryFailed {
                    generation,
                    message: e.to_string(),
                });
            }
        }
    }

    pub async fn refresh_prices(&self) -> PriceTable {
        let table = self.client.prices().refresh().await;
        self.store.dispatch(Action::PricesUpdated(table.clone()));
        table
    }

    /// Refresh prices every `refreshIntervalMs`. Never returns; drop the
    /// future to stop polling.
    pub async fn run_price_poller(&self) {
        let interval = self.client.config().refresh_interval();
        let prices = self.client.prices();
        let mut updates = Box::pin(prices.watch(interval));
        while let Some(table) = updates.next().await {
            self.store.dispatch(Action::PricesUpdated(table));
        }
    }

    /// Ask the wallet to move to the selected chain.
    ///
    /// A chain missing from the wallet is reported to the store as a notice;
    /// other provider failures are returned but not shown.
    pub async fn switch_to_selected_chain(&self) -> Result<(), SwitchNetworkError> {
        let chain = self.store.select(|s| s.selected_chain);
        match self.wallet.switch_network(chain).await {
            Ok(()) => {
                self.store.dispatch(Action::NetworkNotice(None));
                Ok(())
            }
            Err(e @ SwitchNetworkError::ChainNotAdded { .. }) => {
                self.store
                    .dispatch(Action::NetworkNotice(Some(e.to_string())));
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_wallet_on_wrong_chain(&self) -> bool {
        self.store.select(AppState::is_wallet_on_wrong_chain)
    }
}
