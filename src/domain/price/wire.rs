//! Wire types for the `simple/price` endpoint.

use serde::Deserialize;
use std::collections::HashMap;

/// `{"ethereum": {"usd": 2500.12}, ...}`
pub type SimplePriceResponse = HashMap<String, UsdQuote>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsdQuote {
    #[serde(default)]
    pub usd: Option<f64>,
}
