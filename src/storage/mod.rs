pub mod memory;
pub mod supabase;

use anyhow::Result;
use async_trait::async_trait;

/// Somewhere to put photos so the social API can fetch them by URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `path`, replacing any existing object.
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    /// Publicly reachable URL for an object.
    fn public_url(&self, path: &str) -> String;
}

/// Object name for a user's photo: `{chat_id}_{file_unique_id}.jpg`.
pub fn photo_object_name(chat_id: i64, file_unique_id: &str) -> String {
    format!("{chat_id}_{file_unique_id}.jpg")
}
