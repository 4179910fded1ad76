//! Multi-source market data aggregator
//!
//! Orchestrates an ordered list of exchange adapters: each request walks the
//! priority list until one source succeeds, and only when every source has
//! failed does the caller see an error. The tradable-symbol universe for
//! search is cached process-wide and refreshed by fanning out to all sources
//! in parallel, keeping whatever subset answered.

pub mod cache;
pub mod poll;

pub use cache::SymbolCache;
pub use poll::{Poller, SequenceGate};

use crate::config::Config;
use crate::data::{Kline, MarketSnapshot, TimeFrame};
use crate::exchange::{BinanceSource, GateSource, MarketDataSource, OkxSource};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Fixed allow-list sorted to the front of search results.
pub const POPULAR_SYMBOLS: [&str; 10] = [
    "BTCUSDT", "ETHUSDT", "SOLUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT", "DOGEUSDT", "AVAXUSDT",
    "DOTUSDT", "MATICUSDT",
];

const SEARCH_RESULT_LIMIT: usize = 30;

/// Aggregate failure surfaced only after the whole fallback chain is spent.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("all market data sources failed (tried: {})", .sources.join(", "))]
    AllSourcesExhausted { sources: Vec<String> },
}

/// Ordered-fallback facade over the configured exchange adapters.
///
/// The source order is a fixed priority list, not a load balancer: there is
/// no randomization, no scoring, and a success short-circuits the rest of
/// the chain.
pub struct MarketDataAggregator {
    sources: Vec<Arc<dyn MarketDataSource>>,
    symbol_cache: SymbolCache,
}

impl MarketDataAggregator {
    pub fn new(sources: Vec<Arc<dyn MarketDataSource>>, cache_ttl: Duration) -> Self {
        Self {
            sources,
            symbol_cache: SymbolCache::new(cache_ttl),
        }
    }

    /// Standard wiring: OKX first, then Binance, then Gate.
    pub fn with_default_sources(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        Self::new(
            vec![
                Arc::new(OkxSource::new(timeout)),
                Arc::new(BinanceSource::new(timeout)),
                Arc::new(GateSource::new(timeout)),
            ],
            Duration::from_secs(config.symbol_cache_ttl_secs),
        )
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetch klines from the first source in the chain that can serve them.
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<Kline>, MarketError> {
        let mut tried = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.fetch_klines(symbol, timeframe, limit).await {
                Ok(klines) => {
                    info!(
                        source = source.name(),
                        symbol, %timeframe, count = klines.len(), "klines fetched"
                    );
                    return Ok(klines);
                }
                Err(e) => {
                    warn!(source = source.name(), symbol, error = %e, "kline fetch failed, falling through");
                    tried.push(source.name().to_string());
                }
            }
        }

        Err(MarketError::AllSourcesExhausted { sources: tried })
    }

    /// Fetch the 24h snapshot from the first source that answers.
    pub async fn fetch_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, MarketError> {
        let mut tried = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.fetch_snapshot(symbol).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    warn!(source = source.name(), symbol, error = %e, "snapshot fetch failed, falling through");
                    tried.push(source.name().to_string());
                }
            }
        }

        Err(MarketError::AllSourcesExhausted { sources: tried })
    }

    /// Search the tradable-symbol universe.
    ///
    /// Serves from the cache while it is fresh; otherwise refreshes it by
    /// querying every source in parallel and unioning whatever succeeded.
    /// When nothing is cached and every source fails, the popular list is
    /// the answer of last resort.
    pub async fn search_symbols(&self, query: &str) -> Vec<String> {
        if self.symbol_cache.is_stale().await {
            self.refresh_symbol_cache().await;
        }

        let universe = self.symbol_cache.get().await;
        let universe = if universe.is_empty() {
            POPULAR_SYMBOLS.iter().map(|s| s.to_string()).collect()
        } else {
            universe
        };

        let query = query.to_uppercase();
        universe
            .into_iter()
            .filter(|s| query.is_empty() || s.contains(&query))
            .take(SEARCH_RESULT_LIMIT)
            .collect()
    }

    /// Fan out to every source, keep each successful contribution, union
    /// and rank. One slow or broken source never blocks the others.
    async fn refresh_symbol_cache(&self) {
        let results = join_all(self.sources.iter().map(|s| s.fetch_symbols())).await;

        let mut universe: Vec<String> = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(symbols) => {
                    info!(source = source.name(), count = symbols.len(), "symbol universe fetched");
                    universe.extend(symbols);
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "symbol fetch failed, skipping source");
                }
            }
        }

        if universe.is_empty() {
            // Leave whatever was cached before in place.
            return;
        }

        universe.sort_by(|a, b| rank_symbol(a).cmp(&rank_symbol(b)).then_with(|| a.cmp(b)));
        universe.dedup();
        self.symbol_cache.store(universe).await;
    }
}

/// Popular symbols keep their fixed order at the front; everything else
/// sorts lexicographically after them.
fn rank_symbol(symbol: &str) -> usize {
    POPULAR_SYMBOLS
        .iter()
        .position(|p| *p == symbol)
        .unwrap_or(POPULAR_SYMBOLS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_popular_first() {
        let mut symbols = vec![
            "AAVEUSDT".to_string(),
            "ETHUSDT".to_string(),
            "BTCUSDT".to_string(),
            "ZRXUSDT".to_string(),
        ];
        symbols.sort_by(|a, b| rank_symbol(a).cmp(&rank_symbol(b)).then_with(|| a.cmp(b)));
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT", "AAVEUSDT", "ZRXUSDT"]);
    }

    #[test]
    fn test_exhaustion_error_names_sources() {
        let err = MarketError::AllSourcesExhausted {
            sources: vec!["okx".to_string(), "binance".to_string(), "gate".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("okx"));
        assert!(message.contains("binance"));
        assert!(message.contains("gate"));
    }
}
