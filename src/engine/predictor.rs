//! TrendPredictor: fetches posts, scores them, aggregates, and classifies.
//!
//! Collaborators are injected as trait objects so tests can substitute
//! stubs. Steps run strictly one after another; a failure in any
//! collaborator aborts the prediction and no partial result is returned.

use log::{debug, info};
use serde::Serialize;

use crate::config::Config;
use crate::sentiment::{SentimentScorer, VaderScorer};
use crate::signal::reddit::RedditSource;
use crate::signal::yahoo::YahooSource;
use crate::signal::{PostSource, PriceHistorySource, DEFAULT_POST_LIMIT};
use crate::strategy::{aggregate, Thresholds, TrendCall};
use crate::utils::error::Result;
use crate::utils::types::{validate_symbol, Candle, Post, ScoredPost};

/// Trailing window for price history, in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Everything one `predict` call produced.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub symbol: String,
    pub call: TrendCall,
    pub posts: Vec<ScoredPost>,
    /// Side value for reporting; not consulted by the classification.
    pub price_history: Vec<Candle>,
}

/// Price collaborator plus the window it is asked for.
struct PriceFeed {
    source: Box<dyn PriceHistorySource>,
    lookback_days: i64,
}

pub struct TrendPredictor {
    posts: Box<dyn PostSource>,
    scorer: Box<dyn SentimentScorer>,
    prices: Option<PriceFeed>,
    thresholds: Thresholds,
    post_limit: usize,
}

impl TrendPredictor {
    pub fn new(posts: Box<dyn PostSource>, scorer: Box<dyn SentimentScorer>) -> Self {
        Self {
            posts,
            scorer,
            prices: None,
            thresholds: Thresholds::default(),
            post_limit: DEFAULT_POST_LIMIT,
        }
    }

    /// Wire the Reddit, Yahoo, and VADER collaborators from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let reddit = RedditSource::new(&config.reddit)?;
        let mut predictor = Self::new(Box::new(reddit), Box::new(VaderScorer::new()))
            .with_thresholds(Thresholds::from(&config.analysis))
            .with_post_limit(config.analysis.post_limit);
        if config.analysis.include_price_history {
            let yahoo = YahooSource::new(&config.market)?;
            predictor = predictor.with_price_history(Box::new(yahoo), config.market.lookback_days);
        }
        Ok(predictor)
    }

    pub fn with_price_history(mut self, source: Box<dyn PriceHistorySource>, lookback_days: i64) -> Self {
        self.prices = Some(PriceFeed { source, lookback_days });
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_post_limit(mut self, limit: usize) -> Self {
        self.post_limit = limit;
        self
    }

    /// Score each post's body. Titles are left out of the polarity.
    pub fn score_posts(&self, posts: Vec<Post>) -> Vec<ScoredPost> {
        posts
            .into_iter()
            .map(|post| {
                let sentiment = self.scorer.score(&post.body);
                ScoredPost { post, sentiment }
            })
            .collect()
    }

    pub async fn predict(&self, symbol: &str) -> Result<Prediction> {
        validate_symbol(symbol)?;

        let raw = self.posts.fetch_posts(symbol, self.post_limit).await?;
        debug!("fetched {} posts for {}", raw.len(), symbol);
        let scored = self.score_posts(raw);
        let call = TrendCall::from_aggregate(&aggregate(&scored), &self.thresholds);

        let price_history = match &self.prices {
            | Some(feed) => feed.source.fetch_history(symbol, feed.lookback_days).await?,
            | None => Vec::new(),
        };

        match call.aggregate() {
            | Some(a) => info!(
                "{}: {} (mean {:.4} over {} posts, {} candles)",
                symbol,
                call.trend(),
                a.mean_sentiment,
                a.sample_count,
                price_history.len()
            ),
            | None => info!("{}: no posts found, defaulting to {}", symbol, call.trend()),
        }

        Ok(Prediction { symbol: symbol.to_string(), call, posts: scored, price_history })
    }

    /// Re-fetch up to `limit` posts and score them for display.
    pub async fn sample(&self, symbol: &str, limit: usize) -> Result<Vec<ScoredPost>> {
        let raw = self.posts.fetch_posts(symbol, limit).await?;
        Ok(self.score_posts(raw))
    }
}
