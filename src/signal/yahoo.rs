//! Yahoo Finance daily price history.
//!
//! Calls the public chart endpoint with an explicit `period1`/`period2`
//! window and `interval=1d`. Days where Yahoo reports a null field (halts,
//! partial sessions) are dropped. An unknown symbol yields an empty history
//! rather than an error.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use log::{debug, warn};
use serde::Deserialize;

use super::PriceHistorySource;
use crate::config::MarketConfig;
use crate::utils::error::{Error, Result};
use crate::utils::types::{validate_symbol, Candle};

const UPSTREAM: &str = "yahoo finance";
const USER_AGENT: &str = concat!("stock-sentiment/", env!("CARGO_PKG_VERSION"));

pub struct YahooSource {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ChartResp {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Deserialize, Default)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl YahooSource {
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ConfigError(format!("cannot build market data client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &MarketConfig) -> Self {
        Self { client, base_url: config.base_url.trim_end_matches('/').to_string() }
    }
}

fn to_candles(result: ChartResult) -> Vec<Candle> {
    fn field(v: &[Option<f64>], i: usize) -> Option<f64> {
        v.get(i).copied().flatten()
    }

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = Utc.timestamp_opt(ts, 0).single()?.date_naive();
            Some(Candle {
                date,
                open: field(&quote.open, i)?,
                high: field(&quote.high, i)?,
                low: field(&quote.low, i)?,
                close: field(&quote.close, i)?,
                volume: field(&quote.volume, i)?.max(0.0) as u64,
            })
        })
        .collect()
}

#[async_trait]
impl PriceHistorySource for YahooSource {
    async fn fetch_history(&self, symbol: &str, days: i64) -> Result<Vec<Candle>> {
        validate_symbol(symbol)?;
        if days <= 0 {
            return Err(Error::InvalidArgument("days must be positive".into()));
        }
        let end = Utc::now();
        let start = end - Duration::days(days);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let (period1, period2) = (start.timestamp().to_string(), end.timestamp().to_string());

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", "1d"),
                ("events", "history"),
            ])
            .send()
            .await
            .map_err(|e| Error::from_reqwest(UPSTREAM, e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            warn!("{}: no price data for {}", UPSTREAM, symbol);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!("{} returned HTTP {}", UPSTREAM, status.as_u16())));
        }

        let body: ChartResp = resp.json().await.map_err(|e| Error::from_reqwest(UPSTREAM, e))?;
        if let Some(err) = body.chart.error {
            warn!(
                "{}: {} ({})",
                UPSTREAM,
                err.code,
                err.description.unwrap_or_default()
            );
            return Ok(Vec::new());
        }
        let candles = body
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .map(to_candles)
            .unwrap_or_default();
        debug!("{}: {} candles for {} over {} days", UPSTREAM, candles.len(), symbol, days);
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_with_nulls_are_dropped() {
        let json = serde_json::json!({
            "timestamp": [1700000000, 1700086400, 1700172800],
            "indicators": { "quote": [{
                "open":   [10.0, null, 12.0],
                "high":   [11.0, 12.0, 13.0],
                "low":    [9.0, 10.0, 11.0],
                "close":  [10.5, 11.5, 12.5],
                "volume": [1000, 2000, 3000]
            }]}
        });
        let result: ChartResult = serde_json::from_value(json).unwrap();
        let candles = to_candles(result);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 10.5);
        assert_eq!(candles[1].open, 12.0);
        assert_eq!(candles[1].volume, 3000);
    }

    #[test]
    fn missing_quote_block_yields_nothing() {
        let json = serde_json::json!({ "timestamp": [1700000000], "indicators": { "quote": [] } });
        let result: ChartResult = serde_json::from_value(json).unwrap();
        assert!(to_candles(result).is_empty());
    }
}
