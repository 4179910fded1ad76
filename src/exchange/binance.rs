//! Binance spot market data adapter

use crate::data::{Kline, MarketSnapshot, TimeFrame};
use crate::exchange::{normalize_klines, row_f64, row_i64, DataSourceError, MarketDataSource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const SOURCE: &str = "binance";
const DEFAULT_BASE_URL: &str = "https://api.binance.com/api/v3";

/// Binance v3 REST adapter.
///
/// The canonical symbol and timeframe vocabulary is Binance's own, so no
/// translation is needed; kline rows arrive oldest-first.
#[derive(Debug, Clone)]
pub struct BinanceSource {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct BinanceTicker24h {
    #[serde(rename = "priceChange")]
    price_change: String,
    #[serde(rename = "priceChangePercent")]
    price_change_percent: String,
    #[serde(rename = "highPrice")]
    high_price: String,
    #[serde(rename = "lowPrice")]
    low_price: String,
    volume: String,
}

#[derive(Debug, Deserialize)]
struct BinancePrice {
    price: String,
}

#[derive(Debug, Deserialize)]
struct BinanceExchangeInfo {
    symbols: Vec<BinanceSymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct BinanceSymbolInfo {
    symbol: String,
    status: String,
    #[serde(rename = "quoteAsset")]
    quote_asset: String,
}

impl BinanceSource {
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

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, DataSourceError> {
        debug!(url = %url, "binance request");
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
impl MarketDataSource for BinanceSource {
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
            "{}/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            symbol,
            timeframe.as_str(),
            limit
        );

        let rows: Vec<Vec<Value>> = self.get_json(url).await?;
        if rows.is_empty() {
            return Err(DataSourceError::Empty { source_name: SOURCE });
        }

        // Rows are [open_ms, "o", "h", "l", "c", "v", ...], oldest first.
        let mut klines = Vec::with_capacity(rows.len());
        for row in &rows {
            klines.push(Kline::new(
                row_i64(row, 0, SOURCE)? / 1000,
                row_f64(row, 1, SOURCE)?,
                row_f64(row, 2, SOURCE)?,
                row_f64(row, 3, SOURCE)?,
                row_f64(row, 4, SOURCE)?,
                row_f64(row, 5, SOURCE)?,
            ));
        }

        Ok(normalize_klines(klines))
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DataSourceError> {
        let ticker_url = format!("{}/ticker/24hr?symbol={}", self.base_url, symbol);
        let price_url = format!("{}/ticker/price?symbol={}", self.base_url, symbol);

        // Independent endpoints, fetched concurrently.
        let (ticker, price) = tokio::try_join!(
            self.get_json::<BinanceTicker24h>(ticker_url),
            self.get_json::<BinancePrice>(price_url),
        )?;

        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            price: Self::parse("price", &price.price)?,
            change24h: Self::parse("priceChange", &ticker.price_change)?,
            change_percent24h: Self::parse("priceChangePercent", &ticker.price_change_percent)?,
            high24h: Self::parse("highPrice", &ticker.high_price)?,
            low24h: Self::parse("lowPrice", &ticker.low_price)?,
            volume24h: Self::parse("volume", &ticker.volume)?,
            data_source: SOURCE,
        })
    }

    async fn fetch_symbols(&self) -> Result<Vec<String>, DataSourceError> {
        let url = format!("{}/exchangeInfo", self.base_url);
        let info: BinanceExchangeInfo = self.get_json(url).await?;

        Ok(info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING" && s.quote_asset == "USDT")
            .map(|s| s.symbol)
            .collect())
    }
}
