pub mod config;
pub mod db;
pub mod highlights;
pub mod init;
pub mod list;
pub mod log;
pub mod serve;
pub mod submit;

use crate::errors::AppResult;
use crate::ui::messages::success;
use std::fs;
use std::path::Path;

/// Print `content`, or write it to `out` when given.
pub(crate) fn emit(content: &str, out: Option<&String>) -> AppResult<()> {
    match out {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            success(format!("Written: {}", path.display()));
        }
        None => println!("{content}"),
    }
    Ok(())
}
