pub mod sqlite;
pub mod supabase;

use anyhow::Result;
use async_trait::async_trait;

use crate::captioner::CaptionOptions;
use crate::consts::STATUS_PENDING;

/// A record to insert: one uploaded photo and its caption options.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub chat_id: i64,
    pub photo_url: String,
    pub options: CaptionOptions,
    pub status: String,
}

impl NewPost {
    pub fn pending(chat_id: i64, photo_url: impl Into<String>, options: CaptionOptions) -> Self {
        Self {
            chat_id,
            photo_url: photo_url.into(),
            options,
            status: STATUS_PENDING.to_string(),
        }
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: i64,
    pub chat_id: i64,
    pub photo_url: String,
    pub options: CaptionOptions,
    pub status: String,
    pub created_at: Option<String>,
}

impl PostRecord {
    /// Caption by 1-based choice number.
    pub fn caption(&self, choice: usize) -> Option<&str> {
        self.options.get(choice)
    }
}

/// Where photo records live. Insert once, read the latest back.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a record and return its id.
    async fn insert(&self, post: NewPost) -> Result<i64>;

    /// The most recent record for a user, if any.
    async fn latest_for(&self, chat_id: i64) -> Result<Option<PostRecord>>;
}
