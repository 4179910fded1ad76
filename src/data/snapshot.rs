//! Derived 24h ticker summary

use serde::{Deserialize, Serialize};

/// Ticker summary for one symbol, recomputed whole on every poll.
///
/// `data_source` names the adapter that satisfied the request so the UI can
/// show where the numbers came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub price: f64,
    pub change24h: f64,
    pub change_percent24h: f64,
    pub high24h: f64,
    pub low24h: f64,
    pub volume24h: f64,
    /// Adapter that produced this snapshot.
    pub data_source: &'static str,
}
