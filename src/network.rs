//! Network URL constants for hosted services.

/// Alchemy Ethereum mainnet base URL (API key is appended).
pub const ALCHEMY_ETHEREUM_URL: &str = "https://eth-mainnet.g.alchemy.com/v2/";

/// Alchemy Polygon mainnet base URL (API key is appended).
pub const ALCHEMY_POLYGON_URL: &str = "https://polygon-mainnet.g.alchemy.com/v2/";

/// Alchemy Arbitrum mainnet base URL (API key is appended).
pub const ALCHEMY_ARBITRUM_URL: &str = "https://arb-mainnet.g.alchemy.com/v2/";

/// Placeholder indexer key accepted by Alchemy with heavy rate limits.
pub const DEMO_API_KEY: &str = "demo";

/// CoinGecko simple price endpoint.
pub const DEFAULT_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
