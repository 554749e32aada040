use crate::backend::BackendKind;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
    #[serde(default = "default_full_feed_limit")]
    pub full_feed_limit: usize,
    #[serde(default = "default_highlights_limit")]
    pub highlights_limit: usize,
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
    #[serde(default = "default_ready_attempts")]
    pub ready_attempts: u32,
    #[serde(default = "default_ready_interval_ms")]
    pub ready_interval_ms: u64,
    #[serde(default = "default_server_bind")]
    pub server_bind: String,
    #[serde(default)]
    pub ip_hash_pepper: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_store_dir() -> String {
    Config::store_dir_default().to_string_lossy().to_string()
}
fn default_endpoint() -> String {
    "http://localhost:8090".to_string()
}
fn default_full_feed_limit() -> usize {
    50
}
fn default_highlights_limit() -> usize {
    5
}
fn default_snippet_chars() -> usize {
    160
}
fn default_ready_attempts() -> u32 {
    50
}
fn default_ready_interval_ms() -> u64 {
    100
}
fn default_server_bind() -> String {
    "0.0.0.0:8090".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Sqlite,
            database: default_database(),
            endpoint: default_endpoint(),
            store_dir: default_store_dir(),
            full_feed_limit: default_full_feed_limit(),
            highlights_limit: default_highlights_limit(),
            snippet_chars: default_snippet_chars(),
            ready_attempts: default_ready_attempts(),
            ready_interval_ms: default_ready_interval_ms(),
            server_bind: default_server_bind(),
            ip_hash_pepper: String::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.storyfeed`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".storyfeed")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("storyfeed.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("storyfeed.sqlite")
    }

    /// Default directory of the offline fallback store
    pub fn store_dir_default() -> PathBuf {
        Self::config_dir().join("store")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn database_path(&self) -> String {
        expand_tilde(&self.database).to_string_lossy().to_string()
    }

    pub fn store_path(&self) -> PathBuf {
        expand_tilde(&self.store_dir)
    }

    pub fn ready_interval(&self) -> Duration {
        Duration::from_millis(self.ready_interval_ms)
    }

    /// Pepper used to hash client addresses: config, then `IP_HASH_PEPPER`.
    pub fn pepper(&self) -> String {
        if !self.ip_hash_pepper.trim().is_empty() {
            return self.ip_hash_pepper.clone();
        }
        std::env::var("IP_HASH_PEPPER").unwrap_or_default()
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {e}", db_path.display()))
            })?;
        }

        Ok(config.database)
    }
}
