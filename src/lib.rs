//! # Cross-Chain Activity SDK
//!
//! Wallet activity dashboard core for Ethereum, Polygon and Arbitrum, supporting
//! both native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Chain registry, domain models, formatting (always available, WASM-safe)
//! 2. **Wallet**: EIP-1193 provider seam, session manager, in-memory and injected providers
//! 3. **State**: `Store` with a pure reducer and persisted chain preference
//! 4. **HTTP API**: `DashboardHttp` with retry policies and the JSON-RPC envelope
//! 5. **High-Level Client**: `DashboardClient` with nested sub-clients, and the
//!    `Dashboard` composition root
//!
//! The model is single-threaded: wallet providers and the store are `!Send`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crosschain_activity_sdk::prelude::*;
//!
//! let client = DashboardClient::builder()
//!     .indexer_api_key("your-key")
//!     .build()?;
//!
//! let address = Address::parse("0x71c7656ec7ab88b098defb751b7401b5f6d8976f")?;
//! let history = client.transfers().aggregate(&address, Chain::Polygon).await?;
//! let prices = client.prices().refresh().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting helpers.
pub mod shared;

/// Domain modules (vertical slices): chain registry, transfers, prices.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Runtime configuration.
pub mod config;

// ── Layer 2: Wallet ──────────────────────────────────────────────────────────

/// Wallet provider seam and session management.
pub mod wallet;

// ── Layer 3: State ───────────────────────────────────────────────────────────

/// Application state, actions and preference persistence.
pub mod store;

// ── Layer 4: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

/// `Dashboard`: composition root for a UI layer.
#[cfg(feature = "http")]
pub mod app;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::Address;

    // Domain types
    pub use crate::domain::chain::{Chain, ChainInfo};
    pub use crate::domain::price::{PriceTable, TrackedAsset};
    pub use crate::domain::transfer::{Direction, NormalizedTransaction, TxStatus};

    // Errors
    pub use crate::error::{
        AggregationError, ConnectError, ProviderError, SdkError, SwitchNetworkError,
    };

    // Config
    pub use crate::config::DashboardConfig;

    // Wallet
    pub use crate::wallet::{
        is_wallet_on_wrong_chain, InMemoryProvider, WalletProvider, WalletSession,
        WalletSessionManager,
    };
    #[cfg(feature = "wasm")]
    pub use crate::wallet::InjectedProvider;

    // State
    pub use crate::store::persist::{MemoryPreferences, PreferenceStore};
    pub use crate::store::{Action, AppState, Store};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::app::Dashboard;
    #[cfg(feature = "http")]
    pub use crate::client::{DashboardClient, DashboardClientBuilder, PricesClient, TransfersClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
