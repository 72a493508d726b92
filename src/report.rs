//! Console report for a prediction.
//!
//! Rendering is kept separate from I/O so the exact text can be tested.

use std::fmt::Write;
use std::io;

use log::warn;

use crate::engine::{Prediction, TrendPredictor};
use crate::utils::types::{Candle, ScoredPost};

/// Prompt shown before reading the symbol.
pub const PROMPT: &str = "Enter stock symbol (e.g., AAPL): ";

/// Close-to-close move over the fetched window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub first_close: f64,
    pub last_close: f64,
    pub change_pct: f64,
    pub days: usize,
}

impl PriceSummary {
    /// `None` when there are no candles or the first close is zero.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let first = candles.first()?;
        let last = candles.last()?;
        if first.close == 0.0 {
            return None;
        }
        Some(Self {
            first_close: first.close,
            last_close: last.close,
            change_pct: (last.close - first.close) / first.close * 100.0,
            days: candles.len(),
        })
    }
}

/// Header, verdict, aggregate, and price lines.
pub fn render_analysis(prediction: &Prediction, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nAnalysis for {}:", prediction.symbol);
    if color {
        let _ = writeln!(out, "{}", prediction.call.colored());
    } else {
        let _ = writeln!(out, "{}", prediction.call.describe());
    }
    if let Some(a) = prediction.call.aggregate() {
        let _ = writeln!(out, "Mean sentiment: {:.3} across {} posts", a.mean_sentiment, a.sample_count);
    }
    if let Some(p) = PriceSummary::from_candles(&prediction.price_history) {
        let _ = writeln!(
            out,
            "Price: {:.2} -> {:.2} ({:+.2}%) over {} trading days",
            p.first_close, p.last_close, p.change_pct, p.days
        );
    }
    out
}

/// Sample section: title and body sentiment per post.
pub fn render_samples(samples: &[ScoredPost]) -> String {
    let mut out = String::from("\nRecent Reddit posts about this stock:\n");
    for s in samples {
        let _ = writeln!(out, "\nTitle: {}", s.post.title);
        let _ = writeln!(out, "Sentiment: {:.2}", s.sentiment);
    }
    out
}

/// One-line message for a failure caught at the report boundary.
pub fn render_error(err: &dyn std::fmt::Display) -> String {
    format!("Error: {}", err)
}

/// Analyse `symbol` and write the full report to `out`.
///
/// A failed prediction leaves a single `Error: ...` line. A failed sample
/// re-fetch keeps the analysis already written and appends the error line.
/// Only write failures on `out` are returned.
pub async fn write_report<W: io::Write>(
    out: &mut W,
    predictor: &TrendPredictor,
    symbol: &str,
    sample_limit: usize,
    color: bool,
) -> io::Result<()> {
    let prediction = match predictor.predict(symbol).await {
        | Ok(p) => p,
        | Err(e) => return writeln!(out, "{}", render_error(&e)),
    };
    out.write_all(render_analysis(&prediction, color).as_bytes())?;
    out.flush()?;

    match predictor.sample(symbol, sample_limit).await {
        | Ok(samples) => out.write_all(render_samples(&samples).as_bytes()),
        | Err(e) => {
            warn!("sample re-fetch for {} failed: {}", symbol, e);
            writeln!(out, "{}", render_error(&e))
        }
    }
}
