//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Connect error: {0}")]
    Connect(#[from] ConnectError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Network switch error: {0}")]
    SwitchNetwork(#[from] SwitchNetworkError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Response body carried by a non-success status, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            HttpError::ServerError { body, .. } => Some(body),
            HttpError::Unauthorized(body)
            | HttpError::NotFound(body)
            | HttpError::BadRequest(body) => Some(body),
            _ => None,
        }
    }
}

/// Error reported by an EIP-1193 wallet provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (code {code})")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested method/account has not been authorized.
    pub const UNAUTHORIZED: i64 = 4100;
    /// The provider does not support the method.
    pub const UNSUPPORTED_METHOD: i64 = 4200;
    /// The provider is disconnected from all chains.
    pub const DISCONNECTED: i64 = 4900;
    /// The provider is not connected to the requested chain.
    pub const CHAIN_DISCONNECTED: i64 = 4901;
    /// The chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// Internal JSON-RPC error, used for malformed provider payloads.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Self::USER_REJECTED
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

/// Wallet connection errors, shown inline near the connect control.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("{message}")]
    Rejected { code: i64, message: String },

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Wallet returned an invalid account: {0}")]
    InvalidAccount(String),
}

impl From<ProviderError> for ConnectError {
    fn from(e: ProviderError) -> Self {
        let message = if e.message.is_empty() {
            "Failed to connect wallet".to_string()
        } else {
            e.message
        };
        ConnectError::Rejected {
            code: e.code,
            message,
        }
    }
}

/// Transaction history aggregation errors.
#[derive(Error, Debug)]
pub enum AggregationError {
    /// The indexing service explicitly reported a problem.
    #[error("{message}")]
    Service { code: Option<i64>, message: String },

    /// Transport failure with the demo fallback disabled.
    #[error("Transport failure: {0}")]
    Transport(#[from] HttpError),
}

/// Network switch errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchNetworkError {
    #[error("No wallet provider available")]
    NoProvider,

    #[error("Network {chain_name} (chain id {chain_id}) is not added to the wallet; add it manually")]
    ChainNotAdded { chain_id: u64, chain_name: String },

    #[error("Provider rejected network switch: {0}")]
    Provider(ProviderError),
}

/// Preference persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::new(4001, "User rejected the request.");
        assert_eq!(err.to_string(), "User rejected the request. (code 4001)");
        assert!(err.is_user_rejection());
        assert!(!err.is_unrecognized_chain());
    }

    #[test]
    fn test_connect_error_keeps_provider_message() {
        let err: ConnectError = ProviderError::new(4001, "User rejected the request.").into();
        assert_eq!(err.to_string(), "User rejected the request.");
    }

    #[test]
    fn test_connect_error_default_message_when_empty() {
        let err: ConnectError = ProviderError::new(-32000, "").into();
        assert_eq!(err.to_string(), "Failed to connect wallet");
    }

    #[test]
    fn test_switch_network_chain_not_added_display() {
        let err = SwitchNetworkError::ChainNotAdded {
            chain_id: 42161,
            chain_name: "Arbitrum".to_string(),
        };
        assert!(err.to_string().contains("add it manually"));
        assert!(err.to_string().contains("42161"));
    }

    #[test]
    fn test_http_error_body() {
        let err = HttpError::ServerError {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.body(), Some("unavailable"));
        assert_eq!(HttpError::Timeout.body(), None);
    }

    #[test]
    fn test_sdk_error_from_aggregation() {
        let err: SdkError = AggregationError::Service {
            code: Some(-32602),
            message: "invalid address".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Aggregation error: invalid address");
    }
}
