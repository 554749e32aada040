use crate::backend::BackendKind;
use crate::config::Config;
use clap::{Parser, Subcommand};

/// Command-line interface definition for storyfeed
#[derive(Parser)]
#[command(
    name = "storyfeed",
    version = env!("CARGO_PKG_VERSION"),
    about = "Anonymous story feed: share short stories and read the latest ones, online or offline",
    long_about = None
)]
pub struct Cli {
    /// Override database path (selects the sqlite backend)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use the remote posts API at this URL as primary backend
    #[arg(global = true, long = "endpoint")]
    pub endpoint: Option<String>,

    /// Select the primary backend explicitly
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<BackendKind>,

    /// No primary backend: read and write the offline store only
    #[arg(global = true, long = "offline")]
    pub offline: bool,

    /// Override the offline store directory
    #[arg(global = true, long = "store")]
    pub store: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply the global flags on top of the loaded configuration.
    /// `--offline` wins over everything else.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(db) = &self.db {
            cfg.database = db.clone();
            cfg.backend = BackendKind::Sqlite;
        }
        if let Some(endpoint) = &self.endpoint {
            cfg.endpoint = endpoint.clone();
            cfg.backend = BackendKind::Http;
        }
        if let Some(kind) = self.backend {
            cfg.backend = kind;
        }
        if let Some(store) = &self.store {
            cfg.store_dir = store.clone();
        }
        if self.offline {
            cfg.backend = BackendKind::None;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Share a story
    Submit {
        /// Story text (up to 4000 characters)
        text: String,

        #[arg(long, short = 'f', default_value = "", help = "How you feel (up to 100 characters)")]
        feeling: String,

        #[arg(long = "tz", help = "Time zone name (default: $TZ)")]
        timezone: Option<String>,

        #[arg(long = "lang", help = "Language tag (default: from $LANG)")]
        language: Option<String>,

        #[arg(long, help = "Screen descriptor, e.g. 1920x1080@2")]
        screen: Option<String>,

        #[arg(long, help = "Platform string (default: OS-arch)")]
        platform: Option<String>,

        #[arg(long, help = "Print the refreshed feed as HTML")]
        html: bool,
    },

    /// Show the full feed (latest 50 stories)
    List {
        #[arg(long, short = 'n', help = "Show at most N stories (default from config)")]
        limit: Option<usize>,

        #[arg(long, help = "Render HTML instead of text")]
        html: bool,

        #[arg(long, value_name = "FILE", help = "Write the output to FILE")]
        out: Option<String>,
    },

    /// Show the latest highlights (5 stories, snippets)
    Highlights {
        #[arg(long, help = "Render HTML instead of text")]
        html: bool,

        #[arg(long, value_name = "FILE", help = "Write the output to FILE")]
        out: Option<String>,
    },

    /// Run the posts HTTP API
    Serve {
        #[arg(long, value_name = "ADDR", help = "Listen address (default from config, PORT overrides)")]
        bind: Option<String>,
    },
}
