//! # Stock Sentiment
//! Estimates a Bullish / Bearish / Neutral signal for a stock ticker from the
//! polarity of recent Reddit posts, with trailing price history attached for
//! reporting.
//!
//! The pipeline is `signal` (fetch posts and candles) → `sentiment` (score
//! post bodies) → `strategy` (aggregate and classify), driven by
//! [`engine::TrendPredictor`] and rendered by [`report`].

pub use crate::utils::error::{Error, Result};

pub mod config;
pub mod engine;
pub mod report;
pub mod sentiment;
pub mod signal;
pub mod strategy;
pub mod utils;

pub use crate::engine::{Prediction, TrendPredictor};
pub use crate::strategy::{Trend, TrendCall};
