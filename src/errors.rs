//! Unified application error type.
//! All modules (db, backend, core, cli, server) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

use crate::models::story::{MAX_FEELING_CHARS, MAX_STORY_CHARS};

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Validation (shown to the user)
    // ---------------------------
    #[error("Please enter your story.")]
    EmptyStory,

    #[error("Story is too long. Maximum {MAX_STORY_CHARS} characters.")]
    StoryTooLong,

    #[error("Feeling field is too long. Maximum {MAX_FEELING_CHARS} characters.")]
    FeelingTooLong,

    // ---------------------------
    // Backends
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend answered with status {0}")]
    BackendStatus(u16),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors caused by user input rather than by a backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyStory | AppError::StoryTooLong | AppError::FeelingTooLong
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
