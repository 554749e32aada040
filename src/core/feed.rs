//! The anonymous story feed: submit, fetch and render with automatic
//! fallback to the on-device store.

use crate::backend::{
    FallbackStore, FileKvStore, KeyValueStore, StoryBackend, build_primary, wait_until_ready,
};
use crate::config::Config;
use crate::core::submit::{StoryForm, SubmitLogic};
use crate::errors::{AppError, AppResult};
use crate::models::story::sort_newest_first;
use crate::models::{ClientMeta, Source, Story};
use crate::render::{self, RenderSettings, Rendered, View};
use chrono::Utc;
use std::time::Duration;

/// Bounded readiness polling for backends that initialize asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for Readiness {
    fn default() -> Self {
        Self {
            attempts: 50,
            interval: Duration::from_millis(100),
        }
    }
}

/// Entries plus the store that served them.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub stories: Vec<Story>,
    pub source: Source,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub stored: Story,
    pub source: Source,
    pub listing: Rendered,
}

pub struct StoryFeed<S: KeyValueStore> {
    primary: Option<Box<dyn StoryBackend>>,
    fallback: FallbackStore<S>,
    settings: RenderSettings,
    readiness: Readiness,
}

impl StoryFeed<FileKvStore> {
    /// Feed wired from configuration: primary backend per `cfg.backend`,
    /// fallback list in `cfg.store_dir`.
    pub fn from_config(cfg: &Config) -> Self {
        tracing::debug!("primary backend: {}", cfg.backend.as_str());
        StoryFeed::new(
            build_primary(cfg),
            FallbackStore::new(FileKvStore::new(cfg.store_path())),
        )
        .with_settings(RenderSettings::from(cfg))
        .with_readiness(Readiness {
            attempts: cfg.ready_attempts,
            interval: cfg.ready_interval(),
        })
    }
}

impl<S: KeyValueStore> StoryFeed<S> {
    pub fn new(primary: Option<Box<dyn StoryBackend>>, fallback: FallbackStore<S>) -> Self {
        Self {
            primary,
            fallback,
            settings: RenderSettings::default(),
            readiness: Readiness::default(),
        }
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn fallback(&self) -> &FallbackStore<S> {
        &self.fallback
    }

    fn primary(&self) -> AppResult<&dyn StoryBackend> {
        self.primary
            .as_deref()
            .ok_or_else(|| AppError::BackendUnavailable("no primary backend configured".into()))
    }

    /// Newest-first entries from the primary backend only.
    pub fn fetch_primary(&self, limit: usize) -> AppResult<Vec<Story>> {
        let mut stories = self.primary()?.fetch_latest(limit)?;
        sort_newest_first(&mut stories);
        stories.truncate(limit);
        Ok(stories)
    }

    /// Entries from the primary backend, or from the fallback store when the
    /// primary fails.
    pub fn fetch(&self, limit: usize) -> Listing {
        match self.fetch_primary(limit) {
            Ok(stories) => Listing {
                stories,
                source: Source::Primary,
            },
            Err(e) => {
                tracing::warn!("primary fetch failed, using fallback store: {e}");
                Listing {
                    stories: self.fallback.latest(limit),
                    source: Source::Fallback,
                }
            }
        }
    }

    pub fn listing(&self, view: View) -> Listing {
        self.fetch(self.settings.limit(view))
    }

    pub fn render(&self, view: View) -> Rendered {
        let listing = self.listing(view);
        render::html::render(&listing.stories, view, listing.source, &self.settings)
    }

    pub fn render_text(&self, view: View) -> String {
        let listing = self.listing(view);
        render::text::render(&listing.stories, view, listing.source, &self.settings)
    }

    /// Wait for the primary backend before rendering highlights.
    ///
    /// Returns `false` when a primary is configured but never became ready:
    /// callers skip the highlights in that case. Without a primary backend
    /// there is nothing to wait for.
    pub fn wait_for_primary(&self) -> bool {
        match self.primary.as_deref() {
            Some(b) => wait_until_ready(b, self.readiness.attempts, self.readiness.interval),
            None => true,
        }
    }

    /// Highlights view, or `None` when it had to be skipped.
    pub fn render_highlights_when_ready(&self) -> Option<Rendered> {
        if !self.wait_for_primary() {
            return None;
        }
        Some(self.render(View::Highlights))
    }

    /// Validate and store a story, then re-render the full feed.
    ///
    /// Validation errors are returned and leave `form` untouched. Backend
    /// errors are absorbed: the story goes to the fallback store instead.
    pub fn submit(&mut self, form: &mut StoryForm, meta: &ClientMeta) -> AppResult<SubmitOutcome> {
        let story = SubmitLogic::validate(form, meta)?;

        let written = match self.primary() {
            Ok(backend) => backend.create(&story),
            Err(e) => Err(e),
        };

        let (stored, source) = match written {
            Ok(stored) => (stored, Source::Primary),
            Err(e) => {
                tracing::warn!("primary write failed, storing locally: {e}");
                (self.fallback.prepend(story, Utc::now()), Source::Fallback)
            }
        };

        form.clear_text();

        Ok(SubmitOutcome {
            stored,
            source,
            listing: self.render(View::Full),
        })
    }
}
