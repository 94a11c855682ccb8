use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use super::{ChatPlatform, Keyboard, PhotoRef, Update};

/// A message the bot sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Keyboard,
}

/// In-process chat platform for tests. Serves queued updates and stored
/// photos, and records every outgoing message.
#[derive(Default)]
pub struct MockChat {
    batches: Mutex<VecDeque<Vec<Update>>>,
    photos: Mutex<HashMap<String, Vec<u8>>>,
    sent: Mutex<Vec<SentMessage>>,
    commands: Mutex<Vec<(String, String)>>,
    offsets: Mutex<Vec<Option<i64>>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch to be returned by the next `poll`.
    pub fn push_batch(&self, updates: Vec<Update>) {
        self.batches.lock().unwrap().push_back(updates);
    }

    /// Make `bytes` downloadable under `file_id`.
    pub fn add_photo(&self, file_id: &str, bytes: &[u8]) {
        self.photos
            .lock()
            .unwrap()
            .insert(file_id.to_string(), bytes.to_vec());
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn clear_sent(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn commands(&self) -> Vec<(String, String)> {
        self.commands.lock().unwrap().clone()
    }

    /// Offsets passed to each `poll` call.
    pub fn offsets(&self) -> Vec<Option<i64>> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatPlatform for MockChat {
    async fn identity(&self) -> Result<String> {
        Ok("mock_bot".to_string())
    }

    async fn poll(&self, offset: Option<i64>, _timeout: Duration) -> Result<Vec<Update>> {
        self.offsets.lock().unwrap().push(offset);
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn send(&self, chat_id: i64, text: &str, keyboard: Keyboard) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn download(&self, photo: &PhotoRef) -> Result<Vec<u8>> {
        self.photos
            .lock()
            .unwrap()
            .get(&photo.file_id)
            .cloned()
            .ok_or_else(|| anyhow!("MockChat: unknown file {}", photo.file_id))
    }

    async fn set_commands(&self, commands: &[(&str, &str)]) -> Result<()> {
        *self.commands.lock().unwrap() = commands
            .iter()
            .map(|(c, d)| (c.to_string(), d.to_string()))
            .collect();
        Ok(())
    }
}
