//! Aggregator fallback, exhaustion and cache behavior with mock sources

use async_trait::async_trait;
use klinesight::data::{Kline, MarketSnapshot, TimeFrame};
use klinesight::exchange::{DataSourceError, MarketDataSource};
use klinesight::market::{MarketDataAggregator, MarketError, SequenceGate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct MockSource {
    name: &'static str,
    healthy: bool,
    kline_calls: AtomicUsize,
    symbol_calls: AtomicUsize,
    symbols: Vec<&'static str>,
    marker_price: f64,
}

impl MockSource {
    fn healthy(name: &'static str, marker_price: f64, symbols: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            name,
            healthy: true,
            kline_calls: AtomicUsize::new(0),
            symbol_calls: AtomicUsize::new(0),
            symbols,
            marker_price,
        })
    }

    fn broken(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            healthy: false,
            kline_calls: AtomicUsize::new(0),
            symbol_calls: AtomicUsize::new(0),
            symbols: Vec::new(),
            marker_price: 0.0,
        })
    }

    fn klines(&self) -> Vec<Kline> {
        (0..5)
            .map(|i| {
                let p = self.marker_price + i as f64;
                Kline::new(1_700_000_000 + i * 60, p, p + 1.0, p - 1.0, p, 10.0)
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_klines(
        &self,
        _symbol: &str,
        _timeframe: TimeFrame,
        _limit: usize,
    ) -> Result<Vec<Kline>, DataSourceError> {
        self.kline_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy {
            Ok(self.klines())
        } else {
            Err(DataSourceError::source_data(self.name, "mock outage"))
        }
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DataSourceError> {
        if self.healthy {
            Ok(MarketSnapshot {
                symbol: symbol.to_string(),
                price: self.marker_price,
                change24h: 1.0,
                change_percent24h: 1.0,
                high24h: self.marker_price + 5.0,
                low24h: self.marker_price - 5.0,
                volume24h: 1_000.0,
                data_source: self.name,
            })
        } else {
            Err(DataSourceError::source_data(self.name, "mock outage"))
        }
    }

    async fn fetch_symbols(&self) -> Result<Vec<String>, DataSourceError> {
        self.symbol_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy {
            Ok(self.symbols.iter().map(|s| s.to_string()).collect())
        } else {
            Err(DataSourceError::source_data(self.name, "mock outage"))
        }
    }
}

fn aggregator(sources: Vec<Arc<MockSource>>, ttl: Duration) -> MarketDataAggregator {
    let dyn_sources: Vec<Arc<dyn MarketDataSource>> = sources
        .into_iter()
        .map(|s| s as Arc<dyn MarketDataSource>)
        .collect();
    MarketDataAggregator::new(dyn_sources, ttl)
}

#[tokio::test]
async fn fallback_stops_at_first_success() {
    let first = MockSource::broken("alpha");
    let second = MockSource::healthy("beta", 200.0, vec![]);
    let third = MockSource::healthy("gamma", 300.0, vec![]);

    let market = aggregator(
        vec![Arc::clone(&first), Arc::clone(&second), Arc::clone(&third)],
        Duration::from_secs(300),
    );

    let klines = market
        .fetch_klines("BTCUSDT", TimeFrame::H1, 5)
        .await
        .expect("second source should serve the request");

    // beta's data, not gamma's
    assert_eq!(klines[0].close, 200.0);
    assert_eq!(first.kline_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second.kline_calls.load(Ordering::SeqCst), 1);
    assert_eq!(third.kline_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exhaustion_error_mentions_every_source() {
    let market = aggregator(
        vec![
            MockSource::broken("alpha"),
            MockSource::broken("beta"),
            MockSource::broken("gamma"),
        ],
        Duration::from_secs(300),
    );

    let err = market
        .fetch_klines("BTCUSDT", TimeFrame::H1, 5)
        .await
        .expect_err("all sources broken");

    let MarketError::AllSourcesExhausted { sources } = &err;
    assert_eq!(sources, &["alpha", "beta", "gamma"]);

    let message = err.to_string();
    assert!(message.contains("alpha") && message.contains("beta") && message.contains("gamma"));
}

#[tokio::test]
async fn snapshot_reports_winning_source() {
    let market = aggregator(
        vec![
            MockSource::broken("alpha"),
            MockSource::healthy("beta", 42.0, vec![]),
        ],
        Duration::from_secs(300),
    );

    let snapshot = market.fetch_snapshot("ETHUSDT").await.unwrap();
    assert_eq!(snapshot.data_source, "beta");
    assert_eq!(snapshot.price, 42.0);
}

#[tokio::test]
async fn symbol_cache_serves_within_ttl() {
    let alpha = MockSource::healthy("alpha", 1.0, vec!["BTCUSDT", "AAAUSDT"]);
    let beta = MockSource::healthy("beta", 2.0, vec!["BTCUSDT", "ZZZUSDT"]);

    let market = aggregator(vec![Arc::clone(&alpha), Arc::clone(&beta)], Duration::from_secs(300));

    let first = market.search_symbols("").await;
    assert!(first.contains(&"AAAUSDT".to_string()));
    assert!(first.contains(&"ZZZUSDT".to_string()));
    // union dedupes the shared symbol
    assert_eq!(first.iter().filter(|s| *s == "BTCUSDT").count(), 1);

    market.search_symbols("BTC").await;
    market.search_symbols("ETH").await;

    // the first call fanned out once; the rest hit the cache
    assert_eq!(alpha.symbol_calls.load(Ordering::SeqCst), 1);
    assert_eq!(beta.symbol_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn symbol_cache_refreshes_after_expiry() {
    let alpha = MockSource::healthy("alpha", 1.0, vec!["BTCUSDT"]);
    // zero TTL: every search is past expiry
    let market = aggregator(vec![Arc::clone(&alpha)], Duration::ZERO);

    market.search_symbols("").await;
    market.search_symbols("").await;

    assert_eq!(alpha.symbol_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn broken_source_does_not_block_symbol_union() {
    let alpha = MockSource::broken("alpha");
    let beta = MockSource::healthy("beta", 1.0, vec!["SOLUSDT"]);

    let market = aggregator(vec![alpha, beta], Duration::from_secs(300));
    let results = market.search_symbols("SOL").await;
    assert_eq!(results, vec!["SOLUSDT".to_string()]);
}

#[tokio::test]
async fn search_falls_back_to_popular_list() {
    let market = aggregator(vec![MockSource::broken("alpha")], Duration::from_secs(300));

    let results = market.search_symbols("BTC").await;
    assert_eq!(results, vec!["BTCUSDT".to_string()]);

    let all = market.search_symbols("").await;
    assert_eq!(all.len(), 10);
    assert_eq!(all[0], "BTCUSDT");
}

#[tokio::test]
async fn popular_symbols_rank_first_in_search() {
    let alpha = MockSource::healthy("alpha", 1.0, vec!["AAAUSDT", "ETHUSDT", "BTCUSDT"]);
    let market = aggregator(vec![alpha], Duration::from_secs(300));

    let results = market.search_symbols("").await;
    assert_eq!(results[0], "BTCUSDT");
    assert_eq!(results[1], "ETHUSDT");
    assert_eq!(results[2], "AAAUSDT");
}

#[test]
fn latest_completed_fetch_wins() {
    let gate = SequenceGate::new();

    let poll_1 = gate.issue();
    let poll_2 = gate.issue();
    let poll_3 = gate.issue();

    // completion order: 2, 3, then the straggler 1
    assert!(gate.commit(poll_2));
    assert!(gate.commit(poll_3));
    assert!(!gate.commit(poll_1), "stale poll must be discarded");
    assert_eq!(gate.applied(), poll_3);
}
