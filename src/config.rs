//! Runtime configuration loaded from the environment.

use dotenv::dotenv;

pub struct Config {
    /// Number of klines requested per fetch when the caller does not specify.
    pub default_kline_limit: usize,
    /// How long the cached tradable-symbol universe stays fresh.
    pub symbol_cache_ttl_secs: u64,
    /// Fixed interval between dashboard polls.
    pub poll_interval_secs: u64,
    /// Per-request HTTP timeout applied to every exchange adapter.
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(Config {
            default_kline_limit: std::env::var("KLINE_LIMIT")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .unwrap_or(200),
            symbol_cache_ttl_secs: std::env::var("SYMBOL_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_kline_limit: 200,
            symbol_cache_ttl_secs: 300,
            poll_interval_secs: 30,
            http_timeout_secs: 10,
        }
    }
}
