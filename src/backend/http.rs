//! Client for the remote posts API (`/api/posts`, `/api/health`).

use super::StoryBackend;
use crate::errors::{AppError, AppResult};
use crate::models::{NewStory, Story};
use chrono::Utc;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Floor for the health check timeout.
pub const MIN_HEALTH_TIMEOUT: Duration = Duration::from_millis(100);

/// POST body understood by the posts API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody<'a> {
    pub story: &'a str,
    pub feeling: &'a str,
    pub client_tz: &'a str,
    pub client_lang: &'a str,
    pub screen: &'a str,
    pub platform: &'a str,
}

impl<'a> From<&'a NewStory> for PostBody<'a> {
    fn from(s: &'a NewStory) -> Self {
        Self {
            story: &s.text,
            feeling: s.feeling.label(),
            client_tz: &s.meta.timezone,
            client_lang: &s.meta.language,
            screen: &s.meta.screen,
            platform: &s.meta.platform,
        }
    }
}

pub struct HttpBackend {
    base: String,
    client: Client,
    /// Used for `/api/health` only, with a short timeout so that readiness
    /// polling stays bounded by roughly `attempts * interval`.
    health: Client,
}

impl HttpBackend {
    pub fn new(endpoint: &str) -> AppResult<Self> {
        let base = endpoint.trim().trim_end_matches('/').to_string();
        if base.is_empty() {
            return Err(AppError::Config("empty API endpoint".into()));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let health = Client::builder().timeout(MIN_HEALTH_TIMEOUT).build()?;
        Ok(Self {
            base,
            client,
            health,
        })
    }

    /// Timeout of each readiness check (at least 100 ms).
    pub fn with_health_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.health = Client::builder()
            .timeout(timeout.max(MIN_HEALTH_TIMEOUT))
            .build()?;
        Ok(self)
    }

    pub fn posts_url(&self) -> String {
        format!("{}/api/posts", self.base)
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base)
    }
}

fn ensure_success(resp: Response) -> AppResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(AppError::BackendStatus(status.as_u16()))
    }
}

impl StoryBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn is_ready(&self) -> bool {
        self.health
            .get(self.health_url())
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn fetch_latest(&self, limit: usize) -> AppResult<Vec<Story>> {
        let resp = self
            .client
            .get(self.posts_url())
            .query(&[("limit", limit)])
            .send()?;
        // an empty table may come back as `null`
        let body: Option<Vec<Story>> = ensure_success(resp)?.json()?;
        let mut stories = body.unwrap_or_default();
        crate::models::story::sort_newest_first(&mut stories);
        stories.truncate(limit);
        Ok(stories)
    }

    fn create(&self, story: &NewStory) -> AppResult<Story> {
        let resp = self
            .client
            .post(self.posts_url())
            .json(&PostBody::from(story))
            .send()?;
        let resp = ensure_success(resp)?;

        // Only the status is part of the contract; use the echoed post when present.
        let stored = resp.json::<Story>().unwrap_or_else(|e| {
            tracing::debug!("posts API echo not parseable, stamping locally: {e}");
            story.clone().into_story(Utc::now())
        });
        Ok(stored)
    }
}
