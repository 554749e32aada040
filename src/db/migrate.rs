use rusqlite::{Connection, OptionalExtension, Result};

const METADATA_MIGRATION: &str = "20250301_0001_add_anonymous_metadata";

/// Columns added on top of the base `posts` schema.
const METADATA_COLUMNS: [&str; 8] = [
    "ip_hash",
    "ua",
    "accept_lang",
    "referer",
    "client_tz",
    "client_lang",
    "screen",
    "platform",
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `posts` table exists.
fn posts_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='posts'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn posts_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('posts')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    cols.collect()
}

/// Create the base `posts` collection.
fn create_posts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            story       TEXT NOT NULL,
            feeling     TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at DESC);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Add the anonymous metadata columns that are still missing.
fn migrate_add_metadata_columns(conn: &Connection) -> Result<()> {
    if migration_applied(conn, METADATA_MIGRATION)? {
        return Ok(());
    }

    let existing = posts_columns(conn)?;
    for col in METADATA_COLUMNS {
        if existing.iter().any(|c| c == col) {
            continue;
        }
        conn.execute_batch(&format!(
            "ALTER TABLE posts ADD COLUMN {col} TEXT NOT NULL DEFAULT '';"
        ))?;
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added anonymous metadata to posts')",
        [METADATA_MIGRATION],
    )?;

    tracing::debug!("migration applied: {METADATA_MIGRATION}");
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !posts_table_exists(conn)? {
        create_posts_table(conn)?;
        tracing::info!("created posts table");
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at DESC);",
        )?;
    }

    migrate_add_metadata_columns(conn)?;

    Ok(())
}
