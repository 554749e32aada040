//! Persistence backends for stories.
//!
//! A primary backend (SQLite collection or remote HTTP API) is always tried
//! first; the on-device [`fallback::FallbackStore`] takes over whenever the
//! primary returns an error.

pub mod fallback;
pub mod http;
pub mod kv;
pub mod sqlite;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{NewStory, Story};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

pub use fallback::{FallbackStore, STORAGE_KEY};
pub use http::HttpBackend;
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use sqlite::SqliteBackend;

/// Primary persistence mechanism for stories.
pub trait StoryBackend {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Whether the backend has finished initializing.
    fn is_ready(&self) -> bool {
        true
    }

    /// Newest-first, at most `limit` entries.
    fn fetch_latest(&self, limit: usize) -> AppResult<Vec<Story>>;

    /// Persist a validated story and return it as stored.
    fn create(&self, story: &NewStory) -> AppResult<Story>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local SQLite `posts` collection
    #[default]
    Sqlite,
    /// Remote posts API over HTTP
    Http,
    /// No primary backend: fallback store only
    None,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Http => "http",
            BackendKind::None => "none",
        }
    }
}

/// Stand-in for a primary backend that failed to initialize.
/// Never ready; every operation fails and so triggers the fallback.
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl StoryBackend for UnavailableBackend {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn fetch_latest(&self, _limit: usize) -> AppResult<Vec<Story>> {
        Err(AppError::BackendUnavailable(self.reason.clone()))
    }

    fn create(&self, _story: &NewStory) -> AppResult<Story> {
        Err(AppError::BackendUnavailable(self.reason.clone()))
    }
}

/// Resolve the configured primary backend.
///
/// Returns `None` for [`BackendKind::None`]. A backend that cannot even be
/// opened is replaced by an [`UnavailableBackend`].
pub fn build_primary(cfg: &Config) -> Option<Box<dyn StoryBackend>> {
    match cfg.backend {
        BackendKind::None => None,
        BackendKind::Sqlite => match SqliteBackend::open(&cfg.database_path()) {
            Ok(b) => Some(Box::new(b)),
            Err(e) => {
                tracing::warn!("sqlite backend unavailable: {e}");
                Some(Box::new(UnavailableBackend::new(e.to_string())))
            }
        },
        BackendKind::Http => match HttpBackend::new(&cfg.endpoint)
            .and_then(|b| b.with_health_timeout(cfg.ready_interval()))
        {
            Ok(b) => Some(Box::new(b)),
            Err(e) => {
                tracing::warn!("http backend unavailable: {e}");
                Some(Box::new(UnavailableBackend::new(e.to_string())))
            }
        },
    }
}

/// Poll `is_ready()` at most `attempts` times, sleeping `interval` between
/// polls. Returns whether the backend became ready.
pub fn wait_until_ready(backend: &dyn StoryBackend, attempts: u32, interval: Duration) -> bool {
    for attempt in 0..attempts {
        if backend.is_ready() {
            return true;
        }
        if attempt + 1 < attempts {
            thread::sleep(interval);
        }
    }
    tracing::warn!(
        "backend '{}' not ready after {} attempts",
        backend.name(),
        attempts
    );
    false
}
