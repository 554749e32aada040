use super::{client_meta::ClientMeta, feeling::Feeling};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_STORY_CHARS: usize = 4000;
pub const MAX_FEELING_CHARS: usize = 100;
/// Hard caps on rendered listings; configuration can only lower them.
pub const MAX_FULL_FEED: usize = 50;
pub const MAX_HIGHLIGHTS: usize = 5;

/// One anonymous story as read back from a backend.
///
/// JSON field names follow the posts API (`story`, `feeling`, `createdAt`);
/// the older spellings `text`, `feelings` and `date` are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "story", alias = "text")]
    pub text: String,

    #[serde(default, alias = "feelings")]
    pub feeling: Feeling,

    #[serde(rename = "createdAt", alias = "date")]
    pub created_at: DateTime<Utc>,

    #[serde(skip)]
    pub meta: ClientMeta,
}

/// A validated submission, ready to be written by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStory {
    pub text: String,
    pub feeling: Feeling,
    pub meta: ClientMeta,
}

impl NewStory {
    /// Materialize the entry with a client-assigned timestamp
    /// (what the fallback store does).
    pub fn into_story(self, created_at: DateTime<Utc>) -> Story {
        Story {
            id: None,
            text: self.text,
            feeling: self.feeling,
            created_at,
            meta: self.meta,
        }
    }
}

/// Which store served an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Fallback,
}

impl Source {
    pub fn is_offline(&self) -> bool {
        matches!(self, Source::Fallback)
    }
}

/// Sort newest-first by creation time.
pub fn sort_newest_first(stories: &mut [Story]) {
    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
