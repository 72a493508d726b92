//! Prediction orchestration.

pub mod predictor;

pub use predictor::{Prediction, TrendPredictor, DEFAULT_LOOKBACK_DAYS};
