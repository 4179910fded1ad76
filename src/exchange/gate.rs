//! Gate spot market data adapter

use crate::data::{Kline, MarketSnapshot, TimeFrame};
use crate::exchange::{normalize_klines, row_f64, row_i64, DataSourceError, MarketDataSource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const SOURCE: &str = "gate";
const DEFAULT_BASE_URL: &str = "https://api.gateio.ws/api/v4";

/// Gate v4 REST adapter.
///
/// Gate speaks underscore-separated pairs (`BTC_USDT`), has no weekly token
/// (`1w` maps to `7d`), and its candlestick rows are permuted relative to
/// the usual OHLC order: `[time, quote_volume, close, high, low, open,
/// base_amount]`.
#[derive(Debug, Clone)]
pub struct GateSource {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GateTicker {
    last: String,
    change_percentage: String,
    high_24h: String,
    low_24h: String,
    base_volume: String,
}

#[derive(Debug, Deserialize)]
struct GateCurrencyPair {
    id: String,
    quote: String,
    trade_status: String,
}

impl GateSource {
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Canonical `BTCUSDT` -> wire `BTC_USDT`.
    fn to_wire_symbol(symbol: &str) -> String {
        if let Some(base) = symbol.strip_suffix("USDT") {
            format!("{base}_USDT")
        } else if let Some(base) = symbol.strip_suffix("USD") {
            format!("{base}_USD")
        } else {
            symbol.to_string()
        }
    }

    /// Total mapping; Gate expresses a week as seven days.
    fn to_wire_interval(timeframe: TimeFrame) -> &'static str {
        match timeframe {
            TimeFrame::M1 => "1m",
            TimeFrame::M5 => "5m",
            TimeFrame::M15 => "15m",
            TimeFrame::H1 => "1h",
            TimeFrame::H4 => "4h",
            TimeFrame::D1 => "1d",
            TimeFrame::W1 => "7d",
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, DataSourceError> {
        debug!(url = %url, "gate request");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataSourceError::Status {
                source_name: SOURCE,
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    fn parse(field: &str, value: &str) -> Result<f64, DataSourceError> {
        value
            .parse::<f64>()
            .map_err(|_| DataSourceError::source_data(SOURCE, format!("bad {field}: {value}")))
    }
}

#[async_trait]
impl MarketDataSource for GateSource {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<Kline>, DataSourceError> {
        let url = format!(
            "{}/spot/candlesticks?currency_pair={}&interval={}&limit={}",
            self.base_url,
            Self::to_wire_symbol(symbol),
            Self::to_wire_interval(timeframe),
            limit
        );

        let rows: Vec<Vec<Value>> = self.get_json(url).await?;
        if rows.is_empty() {
            return Err(DataSourceError::Empty { source_name: SOURCE });
        }

        // Rows are [time_s, quote_volume, close, high, low, open, base_amount].
        let mut klines = Vec::with_capacity(rows.len());
        for row in &rows {
            klines.push(Kline::new(
                row_i64(row, 0, SOURCE)?,
                row_f64(row, 5, SOURCE)?,
                row_f64(row, 3, SOURCE)?,
                row_f64(row, 4, SOURCE)?,
                row_f64(row, 2, SOURCE)?,
                row_f64(row, 1, SOURCE)?,
            ));
        }

        Ok(normalize_klines(klines))
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DataSourceError> {
        let url = format!(
            "{}/spot/tickers?currency_pair={}",
            self.base_url,
            Self::to_wire_symbol(symbol)
        );

        let tickers: Vec<GateTicker> = self.get_json(url).await?;
        let ticker = tickers
            .first()
            .ok_or(DataSourceError::Empty { source_name: SOURCE })?;

        let price = Self::parse("last", &ticker.last)?;
        let change_percent24h = Self::parse("change_percentage", &ticker.change_percentage)?;
        // Gate only reports the percent move; derive the absolute change
        // from the implied 24h-ago price.
        let change24h = if change_percent24h == -100.0 {
            -price
        } else {
            price - price / (1.0 + change_percent24h / 100.0)
        };

        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            price,
            change24h,
            change_percent24h,
            high24h: Self::parse("high_24h", &ticker.high_24h)?,
            low24h: Self::parse("low_24h", &ticker.low_24h)?,
            volume24h: Self::parse("base_volume", &ticker.base_volume)?,
            data_source: SOURCE,
        })
    }

    async fn fetch_symbols(&self) -> Result<Vec<String>, DataSourceError> {
        let url = format!("{}/spot/currency_pairs", self.base_url);
        let pairs: Vec<GateCurrencyPair> = self.get_json(url).await?;

        Ok(pairs
            .into_iter()
            .filter(|p| p.quote == "USDT" && p.trade_status == "tradable")
            .map(|p| p.id.replace('_', ""))
            .collect())
    }
}
