//! Signal ingestion sources: social posts and price history.

pub mod reddit;
pub mod yahoo;

use async_trait::async_trait;

use crate::utils::error::{Error, Result};
use crate::utils::types::{validate_symbol, Candle, Post};

/// Posts requested when the caller does not say otherwise.
pub const DEFAULT_POST_LIMIT: usize = 100;

/// Source of social posts mentioning a ticker.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Return at most `limit` posts matching `"<symbol> stock"`, in the
    /// upstream's own order.
    async fn fetch_posts(&self, symbol: &str, limit: usize) -> Result<Vec<Post>>;
}

/// Source of daily OHLCV candles.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Candles covering `[now - days, now]`.
    async fn fetch_history(&self, symbol: &str, days: i64) -> Result<Vec<Candle>>;
}

/// Argument checks shared by every `PostSource`.
pub fn validate_post_request(symbol: &str, limit: usize) -> Result<()> {
    validate_symbol(symbol)?;
    if limit == 0 {
        return Err(Error::InvalidArgument("limit must be positive".into()));
    }
    Ok(())
}

/// Search query sent for a symbol.
pub fn search_query(symbol: &str) -> String {
    format!("{} stock", symbol)
}
