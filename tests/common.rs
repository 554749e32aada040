#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Isolated locations for one test: HOME, database and offline store.
pub struct Sandbox {
    pub home: PathBuf,
    pub db: String,
    pub store: String,
}

impl Sandbox {
    pub fn new(name: &str) -> Self {
        let mut home: PathBuf = env::temp_dir();
        home.push(format!("storyfeed_test_{name}"));
        fs::remove_dir_all(&home).ok();
        fs::create_dir_all(&home).expect("create sandbox");

        let db = home.join("stories.sqlite").to_string_lossy().to_string();
        let store = home.join("store").to_string_lossy().to_string();

        Self { home, db, store }
    }

    /// `storyfeed` with HOME pointing into the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("storyfeed");
        cmd.env("HOME", &self.home).env_remove("RUST_LOG");
        cmd
    }

    /// `storyfeed --db <sandbox db> --store <sandbox store> ...`
    pub fn sqlite(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--db", &self.db, "--store", &self.store]);
        cmd
    }

    /// `storyfeed --offline --store <sandbox store> ...`
    pub fn offline(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--offline", "--store", &self.store]);
        cmd
    }

    /// Primary backend is an HTTP API nobody listens on.
    pub fn unreachable(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--endpoint", "http://127.0.0.1:9", "--store", &self.store]);
        cmd
    }

    /// Write `~/.storyfeed/storyfeed.conf` inside the sandbox.
    pub fn write_config(&self, yaml: &str) {
        let dir = self.home.join(".storyfeed");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("storyfeed.conf"), yaml).expect("write config");
    }

    /// Write the on-device story list directly, in the given order.
    /// Each entry is `(text, feeling, RFC 3339 date)`.
    pub fn seed_store(&self, entries: &[(String, String, String)]) {
        let list: Vec<serde_json::Value> = entries
            .iter()
            .map(|(text, feeling, date)| {
                serde_json::json!({ "text": text, "feelings": feeling, "date": date })
            })
            .collect();
        fs::create_dir_all(&self.store).expect("create store dir");
        fs::write(
            PathBuf::from(&self.store).join("msn_anonymous_stories_v1.json"),
            serde_json::to_string(&list).expect("serialize store"),
        )
        .expect("write store");
    }

    pub fn out_file(&self, name: &str) -> String {
        self.home.join(name).to_string_lossy().to_string()
    }
}
