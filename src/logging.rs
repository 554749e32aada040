//! Diagnostic logging via `tracing`.
//!
//! Output goes to stderr so it never mixes with rendered listings on stdout.
//! `RUST_LOG` overrides the default level.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}
