//! Validation and normalization of story submissions.

use crate::errors::{AppError, AppResult};
use crate::models::story::{MAX_FEELING_CHARS, MAX_STORY_CHARS};
use crate::models::{ClientMeta, Feeling, NewStory};

/// The two input fields of the story form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryForm {
    pub text: String,
    pub feeling: String,
}

impl StoryForm {
    pub fn new(text: impl Into<String>, feeling: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            feeling: feeling.into(),
        }
    }

    /// Called after a story was stored (the feeling selection is kept).
    pub fn clear_text(&mut self) {
        self.text.clear();
    }
}

pub struct SubmitLogic;

impl SubmitLogic {
    /// Turn raw form input into a [`NewStory`].
    ///
    /// - text is trimmed and must be non-empty and ≤ 4000 characters
    /// - feeling is trimmed, empty means Unknown, ≤ 100 characters
    /// - metadata fields are truncated to their caps, never rejected
    pub fn validate(form: &StoryForm, meta: &ClientMeta) -> AppResult<NewStory> {
        let text = form.text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyStory);
        }
        if text.chars().count() > MAX_STORY_CHARS {
            return Err(AppError::StoryTooLong);
        }

        let feeling = Feeling::from_input(&form.feeling);
        if feeling.char_len() > MAX_FEELING_CHARS {
            return Err(AppError::FeelingTooLong);
        }

        Ok(NewStory {
            text: text.to_string(),
            feeling,
            meta: meta.capped(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client_meta::{
        MAX_LANG_CHARS, MAX_PLATFORM_CHARS, MAX_SCREEN_CHARS, MAX_TZ_CHARS,
    };

    #[test]
    fn trims_text_and_defaults_feeling() {
        let form = StoryForm::new("  hello there \n", "   ");
        let s = SubmitLogic::validate(&form, &ClientMeta::default()).unwrap();
        assert_eq!(s.text, "hello there");
        assert_eq!(s.feeling, Feeling::Unknown);
        assert_eq!(s.feeling.label(), "Unknown");
    }

    #[test]
    fn rejects_blank_text() {
        let form = StoryForm::new(" \t ", "Sad");
        assert!(matches!(
            SubmitLogic::validate(&form, &ClientMeta::default()),
            Err(AppError::EmptyStory)
        ));
    }

    #[test]
    fn length_limits_are_inclusive() {
        let ok = StoryForm::new("a".repeat(MAX_STORY_CHARS), "f".repeat(MAX_FEELING_CHARS));
        assert!(SubmitLogic::validate(&ok, &ClientMeta::default()).is_ok());

        let long_text = StoryForm::new("a".repeat(MAX_STORY_CHARS + 1), "");
        assert!(matches!(
            SubmitLogic::validate(&long_text, &ClientMeta::default()),
            Err(AppError::StoryTooLong)
        ));

        let long_feeling = StoryForm::new("ok", "f".repeat(MAX_FEELING_CHARS + 1));
        assert!(matches!(
            SubmitLogic::validate(&long_feeling, &ClientMeta::default()),
            Err(AppError::FeelingTooLong)
        ));
    }

    #[test]
    fn limits_count_characters() {
        // 4000 two-byte characters are still within the limit
        let form = StoryForm::new("é".repeat(MAX_STORY_CHARS), "");
        assert!(SubmitLogic::validate(&form, &ClientMeta::default()).is_ok());
    }

    #[test]
    fn metadata_is_truncated_to_exact_caps() {
        let meta = ClientMeta {
            timezone: "z".repeat(150),
            language: "l".repeat(30),
            screen: "s".repeat(101),
            platform: "p".repeat(500),
        };
        let s = SubmitLogic::validate(&StoryForm::new("hi", "Calm"), &meta).unwrap();
        assert_eq!(s.meta.timezone.chars().count(), MAX_TZ_CHARS);
        assert_eq!(s.meta.language.chars().count(), MAX_LANG_CHARS);
        assert_eq!(s.meta.screen.chars().count(), MAX_SCREEN_CHARS);
        assert_eq!(s.meta.platform.chars().count(), MAX_PLATFORM_CHARS);
    }

    #[test]
    fn short_metadata_is_untouched() {
        let meta = ClientMeta::new("Europe/Rome", "it-IT", "1920x1080@2", "linux");
        let s = SubmitLogic::validate(&StoryForm::new("hi", ""), &meta).unwrap();
        assert_eq!(s.meta, meta);
    }
}
