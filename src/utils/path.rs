//! Path utilities: expand `~` in configured locations.

use std::path::PathBuf;

/// Expand a leading `~` (alone or followed by `/`) to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if path == "~" {
            return home;
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
