use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use rusqlite::Connection;
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the offline store directory
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = match &cli.store {
        Some(store) => Config {
            store_dir: store.clone(),
            ..Config::default()
        },
        None => Config::default(),
    };
    fs::create_dir_all(cfg.store_path())?;

    println!("⚙️  Initializing storyfeed…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);
    println!("📦 Offline store: {}", cfg.store_path().display());

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));

    if let Err(e) = log::audit(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 storyfeed initialization completed!");
    Ok(())
}
