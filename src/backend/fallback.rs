//! On-device fallback list.
//!
//! The whole list lives under a single key as JSON:
//! `[{"text": ..., "feelings": ..., "date": ...}]`, newest first.

use super::kv::KeyValueStore;
use crate::models::story::sort_newest_first;
use crate::models::{Feeling, NewStory, Story};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "msn_anonymous_stories_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalRecord {
    text: String,
    #[serde(default)]
    feelings: Feeling,
    date: DateTime<Utc>,
}

impl From<LocalRecord> for Story {
    fn from(r: LocalRecord) -> Self {
        Story {
            id: None,
            text: r.text,
            feeling: r.feelings,
            created_at: r.date,
            meta: Default::default(),
        }
    }
}

pub struct FallbackStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> FallbackStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    fn load_records(&self) -> Vec<LocalRecord> {
        let raw = match self.kv.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("fallback store unreadable, treating as empty: {e}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("fallback store corrupt, treating as empty: {e}");
            Vec::new()
        })
    }

    /// All stored entries, newest first. Never fails.
    pub fn load(&self) -> Vec<Story> {
        self.load_records().into_iter().map(Story::from).collect()
    }

    /// Newest first by `date`, whatever order the list was stored in.
    pub fn latest(&self, limit: usize) -> Vec<Story> {
        let mut all = self.load();
        sort_newest_first(&mut all);
        all.truncate(limit);
        all
    }

    /// Prepend a story stamped with `created_at` (client clock).
    /// A failed write is logged and otherwise ignored.
    pub fn prepend(&mut self, story: NewStory, created_at: DateTime<Utc>) -> Story {
        let stored = story.into_story(created_at);

        let mut records = self.load_records();
        records.insert(
            0,
            LocalRecord {
                text: stored.text.clone(),
                feelings: stored.feeling.clone(),
                date: stored.created_at,
            },
        );

        match serde_json::to_string(&records) {
            Ok(json) => {
                if let Err(e) = self.kv.set(STORAGE_KEY, &json) {
                    tracing::warn!("failed to persist fallback store: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize fallback store: {e}"),
        }

        stored
    }
}
