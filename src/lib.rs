//! Klinesight: multi-exchange kline aggregation and technical analysis
//!
//! This crate provides the data backbone for a candlestick dashboard:
//!
//! - **Data Model**: canonical OHLCV klines, market snapshots and timeframes
//! - **Indicator Engine**: SMA/EMA, RSI (incl. a dual-period pair), MACD,
//!   Bollinger Bands, KDJ, Williams %R, with aligned warm-up handling
//! - **Exchange Adapters**: OKX, Binance and Gate spot REST adapters behind
//!   a single [`exchange::MarketDataSource`] contract
//! - **Aggregator**: ordered-fallback retrieval plus a TTL'd tradable-symbol
//!   cache for search
//!
//! # Example
//!
//! ```no_run
//! use klinesight::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let market = MarketDataAggregator::with_default_sources(&config);
//!     let klines = market.fetch_klines("BTCUSDT", TimeFrame::H1, 200).await?;
//!     let values = calculate_indicators(&klines);
//!     println!("RSI(14) = {:?}", values.rsi);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod exchange;
pub mod indicators;
pub mod market;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::data::*;
    pub use crate::exchange::*;
    pub use crate::indicators::*;
    pub use crate::market::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
