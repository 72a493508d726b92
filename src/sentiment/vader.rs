//! VADER lexicon scorer.
//!
//! Wraps the `vader_sentiment` analyzer, whose word-polarity table is embedded
//! in the crate and parsed once on first use. The score reported is VADER's
//! normalised `compound` value.
//!
//! Text in which no token carries polarity scores 0.0. The analyzer would
//! otherwise turn trailing `!`/`?` emphasis into a negative compound.

use vader_sentiment::SentimentIntensityAnalyzer;

use super::SentimentScorer;

pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self { analyzer: SentimentIntensityAnalyzer::new() }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        let share = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        if share("pos") == 0.0 && share("neg") == 0.0 {
            return 0.0;
        }
        match scores.get("compound") {
            | Some(&c) if c.is_finite() => c.clamp(-1.0, 1.0),
            | _ => 0.0,
        }
    }
}
