use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label shown when a story carries no feeling.
pub const UNKNOWN_FEELING: &str = "Unknown";

/// Feeling/category attached to a story.
///
/// An empty (or whitespace-only) label is never stored as such: it becomes
/// `Feeling::Unknown`, which always renders as "Unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feeling {
    #[default]
    Unknown,
    Named(String),
}

impl Feeling {
    /// Build a feeling from raw form input (trimmed, empty → Unknown).
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNKNOWN_FEELING {
            Feeling::Unknown
        } else {
            Feeling::Named(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Feeling::Unknown => UNKNOWN_FEELING,
            Feeling::Named(s) => s,
        }
    }

    pub fn char_len(&self) -> usize {
        self.label().chars().count()
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Feeling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Feeling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // null and "" both mean "no feeling given"
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(Feeling::from_input(raw.as_deref().unwrap_or("")))
    }
}
