//! Sentiment aggregation.
//!
//! Fuses per-post polarity scores into a single arithmetic mean. An empty
//! batch has no mean, so it is reported as [`Aggregate::NoData`] instead of a
//! NaN or a silent `0.0`.

use serde::{Deserialize, Serialize};

use crate::utils::types::ScoredPost;

/// Mean polarity over a non-empty batch of posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentAggregate {
    pub mean_sentiment: f64,
    /// Always at least 1.
    pub sample_count: usize,
}

/// Result of aggregating a batch that may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Aggregate {
    Sentiment(SentimentAggregate),
    NoData,
}

impl Aggregate {
    pub fn sentiment(&self) -> Option<&SentimentAggregate> {
        match self {
            | Aggregate::Sentiment(a) => Some(a),
            | Aggregate::NoData => None,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sentiment().map_or(0, |a| a.sample_count)
    }
}

/// Mean of raw scores.
pub fn fuse(scores: &[f64]) -> Aggregate {
    if scores.is_empty() {
        return Aggregate::NoData;
    }
    let sum: f64 = scores.iter().copied().sum();
    Aggregate::Sentiment(SentimentAggregate {
        mean_sentiment: sum / scores.len() as f64,
        sample_count: scores.len(),
    })
}

/// Mean sentiment across scored posts.
pub fn aggregate(posts: &[ScoredPost]) -> Aggregate {
    let scores: Vec<f64> = posts.iter().map(|p| p.sentiment).collect();
    fuse(&scores)
}
