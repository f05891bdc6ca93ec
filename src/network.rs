//! Network URL constants for the coinboard client.

/// Default REST API base URL (CoinGecko public API, v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying a CoinGecko demo API key, when one is configured.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";
