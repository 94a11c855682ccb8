use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::ObjectStore;

/// In-process object store used by the bot's tests.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose uploads always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Stored bytes and content type for `path`.
    pub fn get(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes.to_vec(), content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_replaces_existing_object() {
        let store = MemoryStore::new();
        store.upload("a.jpg", b"old", "image/jpeg").await.unwrap();
        store.upload("a.jpg", b"new", "image/jpeg").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a.jpg").unwrap().0, b"new");
    }

    #[tokio::test]
    async fn failing_store_rejects_uploads() {
        let store = MemoryStore::failing("bucket not found");
        let err = store.upload("a.jpg", b"x", "image/jpeg").await.unwrap_err();
        assert_eq!(err.to_string(), "bucket not found");
        assert!(store.is_empty());
    }
}
