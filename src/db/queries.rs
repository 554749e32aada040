use crate::db::models::{LogRow, RequestMeta};
use crate::errors::AppResult;
use crate::models::{ClientMeta, Feeling, NewStory, Story};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Result, Row, params};

/// Fixed-width UTC timestamps so that `ORDER BY created_at` is chronological.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // SQLite CURRENT_TIMESTAMP format
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn map_row(row: &Row) -> Result<Story> {
    let raw_ts: String = row.get("created_at")?;
    let created_at = parse_timestamp(&raw_ts).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("Invalid created_at: {raw_ts}").into(),
        )
    })?;

    let feeling: String = row.get("feeling")?;

    Ok(Story {
        id: Some(row.get("id")?),
        text: row.get("story")?,
        feeling: Feeling::from_input(&feeling),
        created_at,
        meta: ClientMeta {
            timezone: row.get("client_tz")?,
            language: row.get("client_lang")?,
            screen: row.get("screen")?,
            platform: row.get("platform")?,
        },
    })
}

/// Insert a validated story; `created_at` is assigned here, server side.
pub fn insert_post(conn: &Connection, story: &NewStory, req: &RequestMeta) -> AppResult<Story> {
    let created_at = Utc::now();

    conn.execute(
        "INSERT INTO posts (story, feeling, created_at, ip_hash, ua, accept_lang, referer,
                            client_tz, client_lang, screen, platform)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            story.text,
            story.feeling.label(),
            format_timestamp(&created_at),
            req.ip_hash,
            req.user_agent,
            req.accept_language,
            req.referer,
            story.meta.timezone,
            story.meta.language,
            story.meta.screen,
            story.meta.platform,
        ],
    )?;

    Ok(Story {
        id: Some(conn.last_insert_rowid()),
        text: story.text.clone(),
        feeling: story.feeling.clone(),
        created_at,
        meta: story.meta.clone(),
    })
}

/// Newest-first, at most `limit` posts.
pub fn load_latest_posts(conn: &Connection, limit: usize) -> AppResult<Vec<Story>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM posts
         ORDER BY created_at DESC, id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit as i64], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_posts(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
}

pub fn load_log(conn: &Connection) -> Result<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogRow {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    rows.collect()
}
