//! storyfeed library root.
//! Exposes the CLI parser, the high-level run() function and the story feed
//! building blocks (models, backends, renderer, API server).

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod site;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

pub use core::feed::StoryFeed;
pub use core::submit::StoryForm;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Submit { .. } => cli::commands::submit::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Highlights { .. } => cli::commands::highlights::handle(&cli.command, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ diagnostics (the API server is chattier by default)
    let level = if matches!(cli.command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    };
    logging::init(level);

    // 3️⃣ load config once, then apply command-line overrides
    let mut cfg = Config::load()?;
    cli.apply_overrides(&mut cfg);

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
