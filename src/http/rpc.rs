//! JSON-RPC 2.0 envelope used by the indexer (and mirrored by wallet providers).

use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outbound request envelope: `{id, jsonrpc, method, params}`.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<P> {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
}

impl<P> RpcRequest<P> {
    pub fn new(id: u64, method: &'static str, params: P) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}

/// Inbound envelope. Exactly one of `result`/`error` is expected, but both are
/// optional so a malformed reply still decodes and can be inspected.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// `{code, message}` error member of a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Extract a JSON-RPC error from a raw (non-success) response body.
pub fn error_from_body(body: &str) -> Option<RpcErrorObject> {
    serde_json::from_str::<RpcResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|r| r.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_shape() {
        let req = RpcRequest::new(1, "eth_blockNumber", Vec::<u8>::new());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "jsonrpc": "2.0", "method": "eth_blockNumber", "params": []})
        );
    }

    #[test]
    fn test_response_with_error() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid address"}}"#;
        let resp: RpcResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().message, "invalid address");
    }

    #[test]
    fn test_error_from_body() {
        assert_eq!(
            error_from_body(r#"{"error":{"message":"Must be authenticated!"}}"#)
                .unwrap()
                .message,
            "Must be authenticated!"
        );
        assert!(error_from_body("<html>502</html>").is_none());
        assert!(error_from_body(r#"{"result":{}}"#).is_none());
    }
}
