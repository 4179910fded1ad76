//! OKX spot market data adapter

use crate::data::{Kline, MarketSnapshot, TimeFrame};
use crate::exchange::{normalize_klines, row_f64, row_i64, DataSourceError, MarketDataSource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const SOURCE: &str = "okx";
const DEFAULT_BASE_URL: &str = "https://www.okx.com/api/v5";

/// OKX v5 REST adapter.
///
/// OKX speaks dash-separated instrument ids (`BTC-USDT`), uppercases the
/// hour-and-up interval tokens, wraps everything in a `{code, msg, data}`
/// envelope and returns candle rows newest-first.
#[derive(Debug, Clone)]
pub struct OkxSource {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OkxEnvelope<T> {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct OkxTicker {
    last: String,
    #[serde(rename = "open24h")]
    open_24h: String,
    #[serde(rename = "high24h")]
    high_24h: String,
    #[serde(rename = "low24h")]
    low_24h: String,
    #[serde(rename = "vol24h")]
    vol_24h: String,
}

#[derive(Debug, Deserialize)]
struct OkxInstrument {
    #[serde(rename = "instId")]
    inst_id: String,
    #[serde(rename = "quoteCcy")]
    quote_ccy: String,
    state: String,
}

impl OkxSource {
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

    /// Canonical `BTCUSDT` -> wire `BTC-USDT`. Deterministic and reversible
    /// for the USDT/USD quotes this system trades in.
    fn to_wire_symbol(symbol: &str) -> String {
        if let Some(base) = symbol.strip_suffix("USDT") {
            format!("{base}-USDT")
        } else if let Some(base) = symbol.strip_suffix("USD") {
            format!("{base}-USD")
        } else {
            symbol.to_string()
        }
    }

    fn to_wire_interval(timeframe: TimeFrame) -> &'static str {
        match timeframe {
            TimeFrame::M1 => "1m",
            TimeFrame::M5 => "5m",
            TimeFrame::M15 => "15m",
            TimeFrame::H1 => "1H",
            TimeFrame::H4 => "4H",
            TimeFrame::D1 => "1D",
            TimeFrame::W1 => "1W",
        }
    }

    async fn get_envelope<T: serde::de::DeserializeOwned + Default>(
        &self,
        url: String,
    ) -> Result<T, DataSourceError> {
        debug!(url = %url, "okx request");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataSourceError::Status {
                source_name: SOURCE,
                status: response.status(),
            });
        }

        let envelope: OkxEnvelope<T> = response.json().await?;
        if envelope.code != "0" {
            return Err(DataSourceError::source_data(SOURCE, envelope.msg));
        }
        envelope
            .data
            .ok_or(DataSourceError::Empty { source_name: SOURCE })
    }
}

#[async_trait]
impl MarketDataSource for OkxSource {
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
            "{}/market/candles?instId={}&bar={}&limit={}",
            self.base_url,
            Self::to_wire_symbol(symbol),
            Self::to_wire_interval(timeframe),
            limit
        );

        let rows: Vec<Vec<Value>> = self.get_envelope(url).await?;
        if rows.is_empty() {
            return Err(DataSourceError::Empty { source_name: SOURCE });
        }

        // Rows are [ts_ms, o, h, l, c, vol, ...], newest first.
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
        let url = format!(
            "{}/market/ticker?instId={}",
            self.base_url,
            Self::to_wire_symbol(symbol)
        );

        let tickers: Vec<OkxTicker> = self.get_envelope(url).await?;
        let ticker = tickers
            .first()
            .ok_or(DataSourceError::Empty { source_name: SOURCE })?;

        let parse = |field: &str, value: &str| -> Result<f64, DataSourceError> {
            value
                .parse::<f64>()
                .map_err(|_| DataSourceError::source_data(SOURCE, format!("bad {field}: {value}")))
        };

        let price = parse("last", &ticker.last)?;
        let open_24h = parse("open24h", &ticker.open_24h)?;
        let change24h = price - open_24h;

        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            price,
            change24h,
            change_percent24h: if open_24h == 0.0 {
                0.0
            } else {
                change24h / open_24h * 100.0
            },
            high24h: parse("high24h", &ticker.high_24h)?,
            low24h: parse("low24h", &ticker.low_24h)?,
            volume24h: parse("vol24h", &ticker.vol_24h)?,
            data_source: SOURCE,
        })
    }

    async fn fetch_symbols(&self) -> Result<Vec<String>, DataSourceError> {
        let url = format!("{}/public/instruments?instType=SPOT", self.base_url);
        let instruments: Vec<OkxInstrument> = self.get_envelope(url).await?;

        Ok(instruments
            .into_iter()
            .filter(|i| i.quote_ccy == "USDT" && i.state == "live")
            .map(|i| i.inst_id.replace('-', ""))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_translation() {
        assert_eq!(OkxSource::to_wire_symbol("BTCUSDT"), "BTC-USDT");
        assert_eq!(OkxSource::to_wire_symbol("ETHUSD"), "ETH-USD");
        assert_eq!(OkxSource::to_wire_symbol("BTC-USDT"), "BTC-USDT");
    }

    #[test]
    fn test_interval_mapping_is_total() {
        for tf in TimeFrame::ALL {
            assert!(!OkxSource::to_wire_interval(tf).is_empty());
        }
        assert_eq!(OkxSource::to_wire_interval(TimeFrame::H1), "1H");
        assert_eq!(OkxSource::to_wire_interval(TimeFrame::W1), "1W");
    }
}
