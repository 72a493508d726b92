//! Reddit search source.
//!
//! Uses the application-only OAuth flow: one `client_credentials` token is
//! requested with HTTP basic auth and reused until it expires. Searches the
//! configured subreddits as a single multireddit (`r/a+b+c/search`) and pages
//! through the listing with its `after` cursor until `limit` posts are
//! collected or the listing runs out.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, warn};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::{search_query, validate_post_request, PostSource};
use crate::config::RedditConfig;
use crate::utils::error::{Error, Result};
use crate::utils::types::Post;

const UPSTREAM: &str = "reddit";
/// Largest page the listing endpoint serves.
const MAX_PAGE: usize = 100;
/// Refresh this long before the advertised expiry.
const EXPIRY_SLACK: Duration = Duration::from_secs(60);

struct AccessToken {
    value: String,
    expires_at: Instant,
}

pub struct RedditSource {
    client: reqwest::Client,
    config: RedditConfig,
    token: Mutex<Option<AccessToken>>,
}

#[derive(Deserialize)]
struct TokenResp {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
    after: Option<String>,
}

#[derive(Deserialize)]
struct Child {
    data: RawPost,
}

#[derive(Deserialize)]
struct RawPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    created_utc: f64,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let created_at: DateTime<Utc> = Utc
            .timestamp_opt(raw.created_utc as i64, 0)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::from(std::time::UNIX_EPOCH));
        Post { title: raw.title, body: raw.selftext, score: raw.score, created_at }
    }
}

impl RedditSource {
    pub fn new(config: &RedditConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ConfigError(format!("cannot build reddit client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    /// Use a caller-built client (tests point the config at a mock server).
    pub fn with_client(client: reqwest::Client, config: &RedditConfig) -> Self {
        Self { client, config: config.clone(), token: Mutex::new(None) }
    }

    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(tok) = guard.as_ref() {
            if Instant::now() < tok.expires_at {
                return Ok(tok.value.clone());
            }
        }

        let url = format!("{}/api/v1/access_token", self.config.auth_url.trim_end_matches('/'));
        debug!("requesting reddit access token from {}", url);
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::from_reqwest(UPSTREAM, e))?;
        let resp = check_status(resp)?;
        let body: TokenResp = resp.json().await.map_err(|e| Error::from_reqwest(UPSTREAM, e))?;

        let value = match (body.access_token, body.error) {
            | (Some(t), None) if !t.is_empty() => t,
            | (_, err) => {
                return Err(Error::UpstreamUnavailable(format!(
                    "{} rejected credentials: {}",
                    UPSTREAM,
                    err.map(|e| e.to_string()).unwrap_or_else(|| "no access token".into())
                )))
            }
        };
        let ttl = Duration::from_secs(body.expires_in.unwrap_or(3600));
        *guard = Some(AccessToken {
            value: value.clone(),
            expires_at: Instant::now() + ttl.saturating_sub(EXPIRY_SLACK),
        });
        Ok(value)
    }

    async fn fetch_page(&self, token: &str, query: &str, page: usize, after: Option<&str>) -> Result<ListingData> {
        let url = format!(
            "{}/r/{}/search",
            self.config.api_url.trim_end_matches('/'),
            self.config.subreddits.join("+")
        );
        let page_str = page.to_string();
        let mut params = vec![
            ("q", query),
            ("restrict_sr", "true"),
            ("sort", "relevance"),
            ("t", "all"),
            ("raw_json", "1"),
            ("limit", page_str.as_str()),
        ];
        if let Some(a) = after {
            params.push(("after", a));
        }

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .bearer_auth(token)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(UPSTREAM, e))?;
        let resp = check_status(resp)?;
        let listing: Listing = resp.json().await.map_err(|e| Error::from_reqwest(UPSTREAM, e))?;
        Ok(listing.data)
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let msg = match status.as_u16() {
        | 401 | 403 => format!("{} rejected credentials (HTTP {})", UPSTREAM, status.as_u16()),
        | 429 => format!("{} rate limit exceeded", UPSTREAM),
        | code => format!("{} returned HTTP {}", UPSTREAM, code),
    };
    warn!("{}", msg);
    Err(Error::UpstreamUnavailable(msg))
}

#[async_trait]
impl PostSource for RedditSource {
    async fn fetch_posts(&self, symbol: &str, limit: usize) -> Result<Vec<Post>> {
        validate_post_request(symbol, limit)?;
        let token = self.access_token().await?;
        let query = search_query(symbol);

        let mut posts: Vec<Post> = Vec::with_capacity(limit.min(MAX_PAGE));
        let mut after: Option<String> = None;
        while posts.len() < limit {
            let page = (limit - posts.len()).min(MAX_PAGE);
            let data = self.fetch_page(&token, &query, page, after.as_deref()).await?;
            let got = data.children.len();
            posts.extend(data.children.into_iter().map(|c| Post::from(c.data)));
            debug!("reddit page for '{}': {} posts (total {})", query, got, posts.len());

            match data.after {
                | Some(next) if got > 0 => after = Some(next),
                | _ => break,
            }
        }
        posts.truncate(limit);
        Ok(posts)
    }
}
