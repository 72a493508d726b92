//! Text polarity scoring.

pub mod vader;

pub use vader::VaderScorer;

/// Maps text to a polarity in [-1.0, 1.0].
///
/// Implementations must be deterministic and return exactly `0.0` for empty
/// or whitespace-only text.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}
