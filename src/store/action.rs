//! Store actions and the reducer that applies them.

use super::AppState;
use crate::domain::chain::Chain;
use crate::domain::price::PriceTable;
use crate::domain::transfer::NormalizedTransaction;
use crate::shared::Address;
use crate::wallet::WalletSession;

/// Every state transition the dashboard performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ConnectStarted,
    /// A wallet session became available (connect, probe or demo mode).
    SessionEstablished {
        address: Address,
        chain_id: Option<String>,
    },
    ConnectFailed(String),
    /// The wallet switched to another account.
    AccountChanged(Address),
    /// Decimal chain id.
    ChainIdChanged(String),
    Disconnected,
    SelectChain(Chain),
    /// Starts a history load and issues a new generation.
    HistoryRequested { address: Address, chain: Chain },
    HistoryLoaded {
        generation: u64,
        transactions: Vec<NormalizedTransaction>,
    },
    HistoryFailed { generation: u64, message: String },
    /// No address to load history for.
    HistoryCleared,
    PricesUpdated(PriceTable),
    NetworkNotice(Option<String>),
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::ConnectStarted => {
            next.is_connecting = true;
            next.connect_error = None;
        }
        Action::SessionEstablished { address, chain_id } => {
            next.session = WalletSession::connected(address, chain_id);
            next.is_connecting = false;
            next.connect_error = None;
        }
        Action::ConnectFailed(message) => {
            next.is_connecting = false;
            next.connect_error = Some(message);
        }
        Action::AccountChanged(address) => {
            if state.session.address.as_ref() != Some(&address) {
                clear_history(&mut next);
            }
            next.session.address = Some(address);
            next.session.connected = true;
        }
        Action::ChainIdChanged(chain_id) => {
            next.session.chain_id = Some(chain_id);
        }
        Action::Disconnected => {
            next.session = WalletSession::default();
            next.is_connecting = false;
            clear_history(&mut next);
        }
        Action::SelectChain(chain) => {
            next.selected_chain = chain;
            next.network_notice = None;
        }
        Action::HistoryRequested { address, chain } => {
            next.history_generation += 1;
            next.history_for = Some((address, chain));
            next.is_loading_history = true;
            next.history_error = None;
        }
        Action::HistoryLoaded {
            generation,
            transactions,
        } => {
            if is_stale(state, generation) {
                return next;
            }
            next.transactions = transactions;
            next.is_loading_history = false;
        }
        Action::HistoryFailed {
            generation,
            message,
        } => {
            if is_stale(state, generation) {
                return next;
            }
            next.transactions.clear();
            next.history_error = Some(message);
            next.is_loading_history = false;
        }
        Action::HistoryCleared => clear_history(&mut next),
        Action::PricesUpdated(prices) => {
            next.prices = prices;
        }
        Action::NetworkNotice(notice) => {
            next.network_notice = notice;
        }
    }

    next
}

fn is_stale(state: &AppState, generation: u64) -> bool {
    if generation != state.history_generation {
        tracing::debug!(
            generation,
            current = state.history_generation,
            "Dropping superseded history result"
        );
        return true;
    }
    false
}

/// Drop the list and invalidate any load in flight.
fn clear_history(state: &mut AppState) {
    state.history_generation += 1;
    state.history_for = None;
    state.transactions.clear();
    state.is_loading_history = false;
    state.history_error = None;
}
