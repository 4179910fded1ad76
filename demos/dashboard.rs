/// Example: one dashboard refresh cycle for BTCUSDT
///
/// This example demonstrates:
/// - Fetching klines through the ordered fallback chain (OKX -> Binance -> Gate)
/// - Computing the full indicator set on the result
/// - Fetching the 24h snapshot and reporting which source served it

use anyhow::Result;
use klinesight::config::Config;
use klinesight::data::TimeFrame;
use klinesight::indicators::{calculate_indicators, rsi_signal};
use klinesight::market::MarketDataAggregator;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let market = MarketDataAggregator::with_default_sources(&config);

    let symbol = "BTCUSDT";
    let klines = market
        .fetch_klines(symbol, TimeFrame::H1, config.default_kline_limit)
        .await?;
    info!(symbol, bars = klines.len(), "klines fetched");

    let values = calculate_indicators(&klines);
    println!("=== {symbol} 1h indicators ===");
    println!("MA7     : {:?}", values.ma7);
    println!("MA21    : {:?}", values.ma21);
    println!("RSI(14) : {:?}", values.rsi);
    if let Some(rsi) = values.rsi {
        println!("RSI bias: {:?}", rsi_signal(rsi));
    }
    if let Some(macd) = values.macd {
        println!(
            "MACD    : dif={:.4} dea={:.4} hist={:.4}",
            macd.macd, macd.signal, macd.histogram
        );
    }
    if let Some(bands) = values.bollinger {
        println!(
            "BOLL    : upper={:.2} middle={:.2} lower={:.2}",
            bands.upper, bands.middle, bands.lower
        );
    }
    if let Some(kdj) = values.kdj {
        println!("KDJ     : k={:.2} d={:.2} j={:.2}", kdj.k, kdj.d, kdj.j);
    }
    println!("W%R(14) : {:?}", values.williams_r);

    let snapshot = market.fetch_snapshot(symbol).await?;
    println!(
        "price {} ({:+.2}%) via {}",
        snapshot.price, snapshot.change_percent24h, snapshot.data_source
    );

    Ok(())
}
