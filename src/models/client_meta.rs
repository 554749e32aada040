//! Opportunistic, non-identifying client metadata sent along with a story.

use serde::{Deserialize, Serialize};

pub const MAX_TZ_CHARS: usize = 100;
pub const MAX_LANG_CHARS: usize = 20;
pub const MAX_SCREEN_CHARS: usize = 100;
pub const MAX_PLATFORM_CHARS: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMeta {
    pub timezone: String,
    pub language: String,
    pub screen: String,
    pub platform: String,
}

impl ClientMeta {
    /// Build metadata, trimming every field and truncating it to its cap.
    /// Over-long values are never rejected.
    pub fn new(timezone: &str, language: &str, screen: &str, platform: &str) -> Self {
        Self {
            timezone: truncate_chars(timezone.trim(), MAX_TZ_CHARS),
            language: truncate_chars(language.trim(), MAX_LANG_CHARS),
            screen: truncate_chars(screen.trim(), MAX_SCREEN_CHARS),
            platform: truncate_chars(platform.trim(), MAX_PLATFORM_CHARS),
        }
    }

    /// Re-apply the caps (used on metadata that arrives from outside).
    pub fn capped(&self) -> Self {
        Self::new(&self.timezone, &self.language, &self.screen, &self.platform)
    }

    /// Best-effort detection from the process environment.
    ///
    /// - timezone: `TZ`
    /// - language: `LC_ALL`, `LANG` ("en_US.UTF-8" → "en-US")
    /// - screen:   `COLUMNS`x`LINES` when both are exported
    /// - platform: OS/arch of the running binary
    pub fn detect() -> Self {
        let tz = std::env::var("TZ").unwrap_or_default();

        let lang = std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .map(|v| locale_to_tag(&v))
            .unwrap_or_default();

        let screen = match (std::env::var("COLUMNS"), std::env::var("LINES")) {
            (Ok(c), Ok(l)) if !c.is_empty() && !l.is_empty() => format!("{c}x{l}@1"),
            _ => String::new(),
        };

        let platform = format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH);

        Self::new(&tz, &lang, &screen, &platform)
    }
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn locale_to_tag(locale: &str) -> String {
    let base = locale.split(['.', '@']).next().unwrap_or("");
    if base == "C" || base == "POSIX" {
        return String::new();
    }
    base.replace('_', "-")
}
