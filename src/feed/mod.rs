// src/feed/mod.rs
// Feed access: a small source trait so report assembly can run against
// canned documents in tests, plus the real LiveScore client.

pub mod raw;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

use crate::policy::Sport;
use raw::RawFeed;

pub const DEFAULT_BASE_URL: &str = "https://prod-public-api.livescore.com/v1/api/app";

const USER_AGENT: &str = concat!("scorebar/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where raw feed documents come from.
#[async_trait]
pub trait FeedSource {
    /// Current live snapshot for the sport.
    async fn live(&self, sport: Sport) -> Result<RawFeed>;
    /// Schedule/results for one calendar day.
    async fn by_date(&self, sport: Sport, date: NaiveDate) -> Result<RawFeed>;
    fn name(&self) -> &'static str;
}

/// HTTP client against the public LiveScore app API.
pub struct LiveScoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl LiveScoreClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("building feed http client")?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    async fn get_feed(&self, url: String) -> Result<RawFeed> {
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("feed returned error status for {url}"))?;
        let feed = resp
            .json::<RawFeed>()
            .await
            .with_context(|| format!("decoding feed body from {url}"))?;
        Ok(feed)
    }
}

fn live_url(base: &str, sport: Sport) -> String {
    format!("{}/live/{}/0", base, sport.feed_path())
}

fn date_url(base: &str, sport: Sport, date: NaiveDate) -> String {
    format!("{}/date/{}/{}/0", base, sport.feed_path(), date.format("%Y%m%d"))
}

#[async_trait]
impl FeedSource for LiveScoreClient {
    async fn live(&self, sport: Sport) -> Result<RawFeed> {
        self.get_feed(live_url(&self.base_url, sport)).await
    }

    async fn by_date(&self, sport: Sport, date: NaiveDate) -> Result<RawFeed> {
        self.get_feed(date_url(&self.base_url, sport, date)).await
    }

    fn name(&self) -> &'static str {
        "livescore"
    }
}

/// Canned source serving fixed documents; date parameters are ignored.
/// Used by integration tests and offline runs.
pub struct StaticFeed {
    live: RawFeed,
    dated: RawFeed,
}

impl StaticFeed {
    pub fn from_json(live: &str, dated: &str) -> Result<Self> {
        Ok(Self {
            live: serde_json::from_str(live).context("parsing canned live document")?,
            dated: serde_json::from_str(dated).context("parsing canned dated document")?,
        })
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn live(&self, _sport: Sport) -> Result<RawFeed> {
        Ok(self.live.clone())
    }

    async fn by_date(&self, _sport: Sport, _date: NaiveDate) -> Result<RawFeed> {
        Ok(self.dated.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
