//! Application state container.
//!
//! All writes go through [`Store::dispatch`], which runs the pure
//! [`reduce`](action::reduce) function. Readers take snapshots. The selected chain is written through to an optional
//! [`PreferenceStore`](persist::PreferenceStore).

pub mod action;
pub mod persist;

use crate::domain::chain::Chain;
use crate::domain::price::PriceTable;
use crate::domain::transfer::NormalizedTransaction;
use crate::shared::Address;
use crate::wallet::WalletSession;
use persist::PreferenceStore;
use std::cell::RefCell;
use std::rc::Rc;

pub use action::{reduce, Action};

/// Everything the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: WalletSession,
    pub is_connecting: bool,
    /// Shown inline near the connect control.
    pub connect_error: Option<String>,
    pub selected_chain: Chain,
    pub transactions: Vec<NormalizedTransaction>,
    pub is_loading_history: bool,
    pub history_error: Option<String>,
    /// Latest history request; results tagged with an older value are dropped.
    pub history_generation: u64,
    /// Address and chain of the latest history request.
    pub history_for: Option<(Address, Chain)>,
    pub prices: PriceTable,
    /// Network switch guidance, e.g. to add a chain manually.
    pub network_notice: Option<String>,
}

impl AppState {
    /// Whether the shown history belongs to a different address or chain than
    /// the current session and selection.
    pub fn history_is_stale(&self) -> bool {
        let current = self
            .session
            .address
            .as_ref()
            .map(|a| (a, self.selected_chain));
        current != self.history_for.as_ref().map(|(a, c)| (a, *c))
    }

    pub fn is_wallet_on_wrong_chain(&self) -> bool {
        crate::wallet::is_wallet_on_wrong_chain(&self.session, self.selected_chain)
    }
}

struct StoreInner {
    state: RefCell<AppState>,
    preferences: Option<Rc<dyn PreferenceStore>>,
}

/// Shared handle to the application state.
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                preferences: None,
            }),
        }
    }

    /// Start from defaults plus the persisted selected chain.
    ///
    /// An unreadable stored value is logged and ignored.
    pub fn with_preferences(preferences: Rc<dyn PreferenceStore>) -> Self {
        let mut initial = AppState::default();
        match persist::load_selected_chain(preferences.as_ref()) {
            Ok(Some(chain)) => initial.selected_chain = chain,
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring stored preferences: {}", e),
        }
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                preferences: Some(preferences),
            }),
        }
    }

    /// Apply `action` and return the resulting state.
    pub fn dispatch(&self, action: Action) -> AppState {
        let (previous_chain, next) = {
            let mut state = self.inner.state.borrow_mut();
            let previous_chain = state.selected_chain;
            let next = reduce(&state, action);
            *state = next.clone();
            (previous_chain, next)
        };

        if next.selected_chain != previous_chain {
            self.persist(next.selected_chain);
        }
        next
    }

    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Read a single projection without cloning the whole state.
    ///
    /// `f` must not dispatch.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.inner.state.borrow())
    }

    fn persist(&self, chain: Chain) {
        if let Some(preferences) = &self.inner.preferences {
            if let Err(e) = persist::save_selected_chain(preferences.as_ref(), chain) {
                tracing::warn!(%chain, "Failed to persist selected chain: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.snapshot())
            .finish()
    }
}
