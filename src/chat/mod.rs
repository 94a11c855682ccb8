//! The chat platform the bot talks through.
//!
//! [`ChatPlatform`] covers the handful of calls the bot makes: poll for
//! updates, reply with text and an optional keyboard, download a photo,
//! and publish the command list. [`telegram::TelegramChat`] is the real
//! thing; [`mock::MockChat`] records everything for tests.

pub mod mock;
pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A photo attached to a message. Only the largest size is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRef {
    /// Id used to download the file.
    pub file_id: String,
    /// Stable id, the same across bots and re-sends.
    pub file_unique_id: String,
}

/// What a message carries, reduced to what the bot understands.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Photo(PhotoRef),
    Text(String),
    Other,
}

/// A message from a user.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    /// Where replies go.
    pub chat_id: i64,
    /// Who sent it. Conversations and records are keyed by this.
    pub user_id: i64,
    pub content: MessageContent,
}

impl IncomingMessage {
    pub fn text(chat_id: i64, user_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            user_id,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn photo(chat_id: i64, user_id: i64, file_id: &str, file_unique_id: &str) -> Self {
        Self {
            chat_id,
            user_id,
            content: MessageContent::Photo(PhotoRef {
                file_id: file_id.to_string(),
                file_unique_id: file_unique_id.to_string(),
            }),
        }
    }
}

/// One polled update. Updates without a usable message still advance the offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub id: i64,
    pub message: Option<IncomingMessage>,
}

/// Reply keyboard attached to an outgoing message.
#[derive(Debug, Clone, PartialEq)]
pub enum Keyboard {
    /// Leave whatever keyboard the user has.
    Keep,
    /// Show a one-time keyboard with these rows of buttons.
    OneTime(Vec<Vec<String>>),
    /// Hide the keyboard.
    Remove,
}

/// The messaging side of the bot.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Username of the bot account.
    async fn identity(&self) -> Result<String>;

    /// Fetch updates with id >= `offset`, waiting up to `timeout` for new ones.
    async fn poll(&self, offset: Option<i64>, timeout: Duration) -> Result<Vec<Update>>;

    async fn send(&self, chat_id: i64, text: &str, keyboard: Keyboard) -> Result<()>;

    /// Download the bytes of a photo.
    async fn download(&self, photo: &PhotoRef) -> Result<Vec<u8>>;

    /// Publish `(command, description)` pairs so clients can offer them.
    async fn set_commands(&self, commands: &[(&str, &str)]) -> Result<()>;
}
