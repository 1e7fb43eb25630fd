//! HTTP client layer: `DashboardHttp` with retry policies and the JSON-RPC envelope.

pub mod client;
pub mod retry;
pub mod rpc;

pub use client::DashboardHttp;
pub use retry::{RetryConfig, RetryPolicy};
