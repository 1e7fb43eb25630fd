//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching service responses
//! - `convert.rs`: Conversions from wire types, with validation
//! - `client.rs`: Sub-client with HTTP methods and caching

pub mod chain;
pub mod price;
pub mod transfer;
