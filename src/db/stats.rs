use crate::db::pool::DbPool;
use crate::db::queries::count_posts;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTAL POSTS
    //
    let count = count_posts(&pool.conn)?;
    println!("{}• Total posts:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);

    //
    // 3) TIME RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM posts ORDER BY created_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM posts ORDER BY created_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Posted between:{}", CYAN, RESET);
    println!("    first: {}", fmt_first);
    println!("    last:  {}", fmt_last);

    println!();
    Ok(())
}
