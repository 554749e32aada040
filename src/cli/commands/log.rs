use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_log;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_operation};

const MAX_OP_WIDTH: usize = 60;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database_path())?;
    let entries = load_log(&pool.conn)?;

    println!("📜 Internal log:\n");

    if entries.is_empty() {
        println!("(empty)");
        return Ok(());
    }

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    for e in &entries {
        let date = chrono::DateTime::parse_from_rfc3339(&e.date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or_else(|_| e.date.clone());

        let mut op_target = if e.target.is_empty() {
            e.operation.clone()
        } else {
            format!("{} ({})", e.operation, e.target)
        };
        if op_target.chars().count() > MAX_OP_WIDTH {
            op_target = op_target.chars().take(MAX_OP_WIDTH - 3).collect::<String>() + "...";
        }

        println!(
            "{:>id_w$}: {} | {}{:<op_w$}{} => {}",
            e.id,
            date,
            color_for_operation(&e.operation),
            op_target,
            RESET,
            e.message,
            id_w = id_w,
            op_w = MAX_OP_WIDTH
        );
    }

    Ok(())
}
