use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

use super::{NewPost, PostRecord, PostStore};
use crate::captioner::CaptionOptions;

/// SQLite-backed record store.
pub struct SqlitePosts {
    conn: Mutex<Connection>,
}

impl SqlitePosts {
    /// Open or create the posts table. Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        if path != ":memory:"
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path).context("failed to open posts database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                chat_id INTEGER NOT NULL,
                photo_url TEXT NOT NULL,
                option_1 TEXT NOT NULL,
                option_2 TEXT NOT NULL,
                option_3 TEXT NOT NULL,
                status TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS posts_chat_id ON posts (chat_id, id);",
        )
        .context("failed to create posts table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Number of records stored for a user.
    pub fn count_for(&self, chat_id: i64) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE chat_id = ?1",
            [chat_id],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}

#[async_trait]
impl PostStore for SqlitePosts {
    async fn insert(&self, post: NewPost) -> Result<i64> {
        let [o1, o2, o3] = post.options.into_array();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO posts (chat_id, photo_url, option_1, option_2, option_3, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![post.chat_id, post.photo_url, o1, o2, o3, post.status],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn latest_for(&self, chat_id: i64) -> Result<Option<PostRecord>> {
        let conn = self.conn.lock().unwrap();
        let record = conn
            .query_row(
                "SELECT id, chat_id, photo_url, option_1, option_2, option_3, status, created_at
                 FROM posts WHERE chat_id = ?1 ORDER BY id DESC LIMIT 1",
                [chat_id],
                |row| {
                    Ok(PostRecord {
                        id: row.get(0)?,
                        chat_id: row.get(1)?,
                        photo_url: row.get(2)?,
                        options: CaptionOptions::new(row.get(3)?, row.get(4)?, row.get(5)?),
                        status: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}
