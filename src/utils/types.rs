//! Common types used throughout the sentiment pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::{Error, Result};

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.\-\^=]{1,12}$").expect("ticker pattern is valid"));

/// Normalise user input to the canonical ticker form (trimmed, uppercase).
pub fn normalize_symbol(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Reject symbols that cannot be a ticker (empty, whitespace, punctuation
/// other than `.`, `-`, `^`, `=`).
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(Error::InvalidArgument("symbol must not be empty".into()));
    }
    if !TICKER_RE.is_match(symbol) {
        return Err(Error::InvalidArgument(format!("'{}' is not a ticker symbol", symbol)));
    }
    Ok(())
}

/// A social post returned by a [`PostSource`](crate::signal::PostSource).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub title: String,
    /// Self-text; empty for link posts.
    pub body: String,
    /// Community upvote count.
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            score: 0,
            created_at: Utc::now(),
        }
    }
}

/// A post together with the polarity of its body text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredPost {
    pub post: Post,
    /// Polarity in [-1.0, 1.0].
    pub sentiment: f64,
}

/// One OHLCV row for a single trading day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}
