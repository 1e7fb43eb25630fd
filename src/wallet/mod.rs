//! Wallet integration: provider seam, session value and session manager.

#[cfg(feature = "wasm")]
pub mod injected;
pub mod manager;
pub mod memory;
pub mod provider;
pub mod session;

#[cfg(feature = "wasm")]
pub use injected::InjectedProvider;
pub use manager::WalletSessionManager;
pub use memory::InMemoryProvider;
pub use provider::{EventListener, ListenerId, ListenerRegistration, ProviderEvent, WalletProvider};
pub use session::{is_wallet_on_wrong_chain, WalletSession};
