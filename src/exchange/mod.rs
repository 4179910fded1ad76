//! Exchange adapters
//!
//! One small module per data source, all implementing the same structural
//! contract: translate the canonical symbol/timeframe vocabulary into the
//! source's wire format, call its REST API, and parse the response into the
//! canonical [`Kline`]/[`MarketSnapshot`] shapes. No transport error ever
//! crosses the adapter boundary raw; everything surfaces as
//! [`DataSourceError`].

pub mod binance;
pub mod gate;
pub mod okx;

pub use binance::BinanceSource;
pub use gate::GateSource;
pub use okx::OkxSource;

use crate::data::{Kline, MarketSnapshot, TimeFrame};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single data source. The aggregator treats every variant the
/// same way: log it and fall through to the next source.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Network/HTTP-level failure (DNS, timeout, connection reset, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source answered with a non-2xx status.
    #[error("{source_name} returned HTTP {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    /// Well-formed HTTP response carrying the source's own error envelope,
    /// or a payload that does not parse into the expected shape.
    #[error("{source_name} data error: {message}")]
    SourceData {
        source_name: &'static str,
        message: String,
    },

    /// Zero-length payload where data was expected.
    #[error("{source_name} returned an empty payload")]
    Empty { source_name: &'static str },
}

impl DataSourceError {
    pub fn source_data(source: &'static str, message: impl Into<String>) -> Self {
        Self::SourceData {
            source_name: source,
            message: message.into(),
        }
    }
}

/// Structural contract shared by every exchange adapter.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Short identifier used in logs, error context and snapshot tagging.
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` klines, ascending by open time.
    async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<Kline>, DataSourceError>;

    /// Fetch the 24h ticker summary for one symbol.
    async fn fetch_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DataSourceError>;

    /// Fetch the tradable USDT-quoted symbol universe in canonical form.
    async fn fetch_symbols(&self) -> Result<Vec<String>, DataSourceError>;
}

/// Enforce the ordering invariant on parsed rows: strictly ascending open
/// times with no duplicates, regardless of the wire format's native order.
pub(crate) fn normalize_klines(mut klines: Vec<Kline>) -> Vec<Kline> {
    klines.sort_by_key(|k| k.time);
    klines.dedup_by_key(|k| k.time);
    klines
}

/// Read a JSON array element as f64, accepting both numbers and the
/// numeric strings most exchange APIs emit.
pub(crate) fn row_f64(
    row: &[Value],
    idx: usize,
    source: &'static str,
) -> Result<f64, DataSourceError> {
    let value = row
        .get(idx)
        .ok_or_else(|| DataSourceError::source_data(source, format!("missing field {idx}")))?;

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DataSourceError::source_data(source, format!("bad number at {idx}"))),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| DataSourceError::source_data(source, format!("bad numeric string at {idx}"))),
        other => Err(DataSourceError::source_data(
            source,
            format!("unexpected value at {idx}: {other}"),
        )),
    }
}

/// Read a JSON array element as an i64 timestamp (number or string).
pub(crate) fn row_i64(
    row: &[Value],
    idx: usize,
    source: &'static str,
) -> Result<i64, DataSourceError> {
    row_f64(row, idx, source).map(|v| v as i64)
}
