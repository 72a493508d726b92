//! Threshold policy mapping mean sentiment to a trend label.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregate::{Aggregate, SentimentAggregate};
use crate::config::AnalysisConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// Human-readable verdict shown in the report.
    pub fn describe(&self) -> &'static str {
        match self {
            | Trend::Bullish => "Bullish (Detected - Positive sentiment)",
            | Trend::Bearish => "Bearish (Detected - Negative sentiment)",
            | Trend::Neutral => "Neutral (Detected - Mixed sentiment)",
        }
    }

    /// Label coloured for terminal output.
    pub fn colored(&self) -> colored::ColoredString {
        match self {
            | Trend::Bullish => self.describe().green(),
            | Trend::Bearish => self.describe().red(),
            | Trend::Neutral => self.describe().yellow(),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            | Trend::Bullish => "Bullish",
            | Trend::Bearish => "Bearish",
            | Trend::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

/// Strict band edges: above `bullish` is Bullish, below `bearish` is Bearish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub bullish: f64,
    pub bearish: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { bullish: 0.2, bearish: -0.2 }
    }
}

impl From<&AnalysisConfig> for Thresholds {
    fn from(cfg: &AnalysisConfig) -> Self {
        Self { bullish: cfg.bullish_threshold, bearish: cfg.bearish_threshold }
    }
}

impl Thresholds {
    pub fn classify(&self, mean_sentiment: f64) -> Trend {
        if mean_sentiment > self.bullish {
            Trend::Bullish
        } else if mean_sentiment < self.bearish {
            Trend::Bearish
        } else {
            Trend::Neutral
        }
    }
}

/// Classification of one aggregate, keeping the no-data case visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrendCall {
    Signal { trend: Trend, aggregate: SentimentAggregate },
    /// No posts were found; the label falls back to Neutral.
    InsufficientData,
}

impl TrendCall {
    pub fn from_aggregate(aggregate: &Aggregate, thresholds: &Thresholds) -> Self {
        match aggregate {
            | Aggregate::Sentiment(a) => TrendCall::Signal {
                trend: thresholds.classify(a.mean_sentiment),
                aggregate: *a,
            },
            | Aggregate::NoData => TrendCall::InsufficientData,
        }
    }

    pub fn trend(&self) -> Trend {
        match self {
            | TrendCall::Signal { trend, .. } => *trend,
            | TrendCall::InsufficientData => Trend::Neutral,
        }
    }

    pub fn aggregate(&self) -> Option<&SentimentAggregate> {
        match self {
            | TrendCall::Signal { aggregate, .. } => Some(aggregate),
            | TrendCall::InsufficientData => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            | TrendCall::Signal { trend, .. } => trend.describe(),
            | TrendCall::InsufficientData => "Neutral (Insufficient data - no posts found)",
        }
    }

    pub fn colored(&self) -> colored::ColoredString {
        match self {
            | TrendCall::Signal { trend, .. } => trend.colored(),
            | TrendCall::InsufficientData => self.describe().dimmed(),
        }
    }
}
