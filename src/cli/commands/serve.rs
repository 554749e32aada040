use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::server;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = cmd {
        info("Serving the posts API (Ctrl+C to stop)");
        actix_web::rt::System::new().block_on(server::run(cfg, bind.clone()))?;
    }
    Ok(())
}
