//! Advisor Configuration
//!
//! Endpoint URLs and timeouts, loaded from the environment with sensible
//! defaults for every provider.

/// Default ordered RPC endpoint list, tried in sequence
pub const DEFAULT_RPC_URLS: &[&str] = &[
    "https://api.mainnet-beta.solana.com",
    "https://solana-api.projectserum.com",
    "https://rpc.ankr.com/solana",
];

/// Default explorer fallback API
pub const DEFAULT_EXPLORER_URL: &str = "https://api.solscan.io";

/// Default portfolio analytics API base
pub const DEFAULT_PORTFOLIO_API_URL: &str = "https://api.zerion.io";

/// Default market data API base
pub const DEFAULT_MARKET_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for all upstream providers
#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// Ordered list of RPC endpoints, tried in sequence
    pub rpc_urls: Vec<String>,

    /// Explorer fallback API base URL
    pub explorer_url: String,

    /// Portfolio analytics API base URL
    pub portfolio_api_url: String,

    /// Portfolio analytics API key; None disables the analytics calls
    pub portfolio_api_key: Option<String>,

    /// Market data API base URL
    pub market_api_url: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            rpc_urls: DEFAULT_RPC_URLS.iter().map(ToString::to_string).collect(),
            explorer_url: DEFAULT_EXPLORER_URL.into(),
            portfolio_api_url: DEFAULT_PORTFOLIO_API_URL.into(),
            portfolio_api_key: None,
            market_api_url: DEFAULT_MARKET_API_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AdvisorConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// - `SOLANA_RPC_URLS`: comma-separated endpoint list
    /// - `EXPLORER_API_URL`
    /// - `PORTFOLIO_API_URL` / `PORTFOLIO_API_KEY`
    /// - `MARKET_API_URL`
    /// - `FETCH_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let rpc_urls = std::env::var("SOLANA_RPC_URLS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
            })
            .ok()
            .filter(|urls| !urls.is_empty())
            .unwrap_or(defaults.rpc_urls);

        Self {
            rpc_urls,
            explorer_url: std::env::var("EXPLORER_API_URL").unwrap_or(defaults.explorer_url),
            portfolio_api_url: std::env::var("PORTFOLIO_API_URL")
                .unwrap_or(defaults.portfolio_api_url),
            portfolio_api_key: std::env::var("PORTFOLIO_API_KEY").ok(),
            market_api_url: std::env::var("MARKET_API_URL").unwrap_or(defaults.market_api_url),
            timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.rpc_urls.len(), 3);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.portfolio_api_key.is_none());
    }
}
