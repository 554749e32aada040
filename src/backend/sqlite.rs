use super::StoryBackend;
use crate::db::initialize::init_db;
use crate::db::log::audit_quiet;
use crate::db::models::RequestMeta;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_post, load_latest_posts};
use crate::errors::AppResult;
use crate::models::{NewStory, Story};

/// The `posts` collection kept in a local SQLite file.
pub struct SqliteBackend {
    pool: DbPool,
}

impl SqliteBackend {
    /// Open (or create) the database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }
}

impl StoryBackend for SqliteBackend {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn fetch_latest(&self, limit: usize) -> AppResult<Vec<Story>> {
        load_latest_posts(&self.pool.conn, limit)
    }

    fn create(&self, story: &NewStory) -> AppResult<Story> {
        let stored = insert_post(&self.pool.conn, story, &RequestMeta::default())?;
        audit_quiet(
            &self.pool.conn,
            "post",
            &stored.id.map(|id| id.to_string()).unwrap_or_default(),
            "Story stored from cli",
        );
        Ok(stored)
    }
}
