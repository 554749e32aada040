//! Listing renderer: full feed and highlights, as HTML or terminal text.

pub mod html;
pub mod text;

use crate::config::Config;
use crate::models::Source;
use crate::models::story::{MAX_FULL_FEED, MAX_HIGHLIGHTS};

pub use html::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Full text, date and time, up to `full_limit` entries
    Full,
    /// Snippets, date only, up to `highlights_limit` entries
    Highlights,
}

/// Caps applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub full_limit: usize,
    pub highlights_limit: usize,
    pub snippet_chars: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            full_limit: MAX_FULL_FEED,
            highlights_limit: MAX_HIGHLIGHTS,
            snippet_chars: 160,
        }
    }
}

impl From<&Config> for RenderSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            full_limit: cfg.full_feed_limit.min(MAX_FULL_FEED),
            highlights_limit: cfg.highlights_limit.min(MAX_HIGHLIGHTS),
            snippet_chars: cfg.snippet_chars,
        }
    }
}

impl RenderSettings {
    /// Effective cap for a view, never above the hard caps.
    pub fn limit(&self, view: View) -> usize {
        match view {
            View::Full => self.full_limit.min(MAX_FULL_FEED),
            View::Highlights => self.highlights_limit.min(MAX_HIGHLIGHTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_caps_can_only_lower_the_limits() {
        let cfg = Config {
            full_feed_limit: 500,
            highlights_limit: 20,
            ..Config::default()
        };
        let settings = RenderSettings::from(&cfg);
        assert_eq!(settings.limit(View::Full), 50);
        assert_eq!(settings.limit(View::Highlights), 5);

        let cfg = Config {
            full_feed_limit: 10,
            highlights_limit: 3,
            ..Config::default()
        };
        let settings = RenderSettings::from(&cfg);
        assert_eq!(settings.limit(View::Full), 10);
        assert_eq!(settings.limit(View::Highlights), 3);

        let raised = RenderSettings {
            full_limit: 60,
            ..RenderSettings::default()
        };
        assert_eq!(raised.limit(View::Full), 50);
    }
}

/// A rendered listing, with enough context to tell where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub count: usize,
    pub offline: bool,
}

/// "No stories yet" message for a view.
pub fn placeholder(view: View, source: Source) -> &'static str {
    match (view, source.is_offline()) {
        (View::Full, false) => "No stories yet. Be the first to share.",
        (View::Full, true) => "No stories yet (offline). Be the first to share.",
        (View::Highlights, false) => "No stories yet.",
        (View::Highlights, true) => "No stories yet (offline).",
    }
}
