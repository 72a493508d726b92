//! Aggregation and classification of post sentiment.

pub mod aggregate;
pub mod trend;

pub use aggregate::{aggregate, Aggregate, SentimentAggregate};
pub use trend::{Thresholds, Trend, TrendCall};
