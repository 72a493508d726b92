//! Configuration module for the sentiment pipeline

use crate::utils::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration file read from the working directory when present.
pub const CONFIG_FILE: &str = "stock-sentiment.toml";

/// Environment variable holding the Reddit application id.
pub const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
/// Environment variable holding the Reddit application secret.
pub const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
/// Environment variable holding the descriptive user agent Reddit requires.
pub const ENV_USER_AGENT: &str = "REDDIT_USER_AGENT";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    #[serde(default)]
    pub app: AppConfig,

    /// Reddit API settings
    #[serde(default)]
    pub reddit: RedditConfig,

    /// Market data settings
    #[serde(default)]
    pub market: MarketConfig,

    /// Aggregation and classification settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Application-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level (debug, info, warn, error)
    pub log_level: String,
}

/// Reddit API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// Usually left out of the file and supplied by the environment
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Descriptive user agent, e.g. `stock-sentiment/0.1 by u/someone`
    #[serde(default)]
    pub user_agent: String,

    /// Host serving `/api/v1/access_token`
    #[serde(default = "default_reddit_auth_url")]
    pub auth_url: String,

    /// Host serving authenticated API calls
    #[serde(default = "default_reddit_api_url")]
    pub api_url: String,

    /// Subreddits searched together as one multireddit
    #[serde(default = "default_subreddits")]
    pub subreddits: Vec<String>,
}

/// Market data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Yahoo Finance chart API host
    pub base_url: String,

    /// Trailing window for price history, in calendar days
    pub lookback_days: i64,
}

/// Aggregation and classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Posts fetched for the aggregate
    pub post_limit: usize,

    /// Posts re-fetched for the report's sample section
    pub sample_limit: usize,

    /// Mean sentiment strictly above this is Bullish
    pub bullish_threshold: f64,

    /// Mean sentiment strictly below this is Bearish
    pub bearish_threshold: f64,

    /// Fetch price history alongside the sentiment
    pub include_price_history: bool,
}

fn default_reddit_auth_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_reddit_api_url() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_subreddits() -> Vec<String> {
    vec!["stocks".into(), "investing".into(), "wallstreetbets".into()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            reddit: RedditConfig::default(),
            market: MarketConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: "warn".to_string() }
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: String::new(),
            auth_url: default_reddit_auth_url(),
            api_url: default_reddit_api_url(),
            subreddits: default_subreddits(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            lookback_days: crate::engine::DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            post_limit: crate::signal::DEFAULT_POST_LIMIT,
            sample_limit: 5,
            bullish_threshold: 0.2,
            bearish_threshold: -0.2,
            include_price_history: true,
        }
    }
}

impl Config {
    /// Load the configuration the binary runs with.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Settings come from the TOML file at `path` when it exists, defaults
    /// otherwise; Reddit credentials set in the environment take precedence
    /// over the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenv::dotenv().ok();

        let path = path.as_ref();
        let mut config = if path.exists() {
            debug!("reading configuration from {}", path.display());
            Self::parse(&fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay credentials from the environment; any credential still
    /// unset afterwards is an error naming its variable.
    fn apply_env(&mut self) -> Result<()> {
        let reddit = &mut self.reddit;
        for (name, slot) in [
            (ENV_CLIENT_ID, &mut reddit.client_id),
            (ENV_CLIENT_SECRET, &mut reddit.client_secret),
            (ENV_USER_AGENT, &mut reddit.user_agent),
        ] {
            match env::var(name) {
                | Ok(v) if !v.trim().is_empty() => *slot = v,
                | _ if !slot.trim().is_empty() => {}
                | _ => return Err(Error::ConfigError(format!("missing environment variable {}", name))),
            }
        }
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let reddit = &self.reddit;
        for (name, value) in [
            (ENV_CLIENT_ID, &reddit.client_id),
            (ENV_CLIENT_SECRET, &reddit.client_secret),
            (ENV_USER_AGENT, &reddit.user_agent),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigError(format!("{} must not be empty", name)));
            }
        }
        if reddit.subreddits.is_empty() {
            return Err(Error::ConfigError("at least one subreddit is required".into()));
        }

        let analysis = &self.analysis;
        if analysis.post_limit == 0 || analysis.sample_limit == 0 {
            return Err(Error::ConfigError("post and sample limits must be positive".into()));
        }
        if analysis.bearish_threshold > analysis.bullish_threshold {
            return Err(Error::ConfigError(format!(
                "bearish threshold {} is above bullish threshold {}",
                analysis.bearish_threshold, analysis.bullish_threshold
            )));
        }
        if self.market.lookback_days <= 0 {
            return Err(Error::ConfigError("lookback_days must be positive".into()));
        }
        Ok(())
    }
}
