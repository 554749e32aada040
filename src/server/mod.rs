//! HTTP API serving the posts collection to remote clients.

pub mod client;
pub mod routes;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::info;

pub use routes::configure;

/// Shared state of the API workers.
pub struct AppState {
    pub conn: Mutex<Connection>,
    pub pepper: String,
}

impl AppState {
    pub fn new(pool: DbPool, pepper: impl Into<String>) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            conn: Mutex::new(pool.conn),
            pepper: pepper.into(),
        })
    }

    pub fn in_memory(pepper: impl Into<String>) -> AppResult<Self> {
        Self::new(DbPool::in_memory()?, pepper)
    }
}

/// `host:port` to listen on; `PORT` replaces the configured port.
pub fn bind_address(configured: &str, port_env: Option<&str>) -> String {
    match port_env.map(str::trim).filter(|p| !p.is_empty()) {
        Some(port) => {
            let host = configured
                .rsplit_once(':')
                .map(|(h, _)| h)
                .unwrap_or("0.0.0.0");
            format!("{host}:{port}")
        }
        None => configured.to_string(),
    }
}

pub async fn run(cfg: &Config, bind: Option<String>) -> AppResult<()> {
    let db_path = cfg.database_path();
    let state = AppState::new(DbPool::new(&db_path)?, cfg.pepper())?;

    let port_env = std::env::var("PORT").ok();
    let addr = bind.unwrap_or_else(|| bind_address(&cfg.server_bind, port_env.as_deref()));

    audit_quiet(
        &state.conn.lock(),
        "serve",
        &addr,
        &format!("API listening on {addr}"),
    );

    info!(
        "starting {} v{} on {} (db={})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        addr,
        db_path
    );

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::bind_address;

    #[test]
    fn port_env_overrides_configured_port() {
        assert_eq!(bind_address("0.0.0.0:8090", None), "0.0.0.0:8090");
        assert_eq!(bind_address("127.0.0.1:8090", Some("9000")), "127.0.0.1:9000");
        assert_eq!(bind_address("127.0.0.1:8090", Some("  ")), "127.0.0.1:8090");
    }
}
