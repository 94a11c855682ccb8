use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatPlatform, IncomingMessage, Keyboard, MessageContent, PhotoRef, Update};

const API_URL: &str = "https://api.telegram.org";

/// Extra time on top of the long-poll timeout before the HTTP request gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram Bot API over plain HTTPS.
pub struct TelegramChat {
    client: reqwest::Client,
    token: String,
}

impl TelegramChat {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{API_URL}/bot{}/{method}", self.token)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{API_URL}/file/bot{}/{file_path}", self.token)
    }

    /// Call a Bot API method and unwrap the `{ok, result}` envelope.
    async fn call<B, T>(&self, method: &str, body: &B, timeout: Option<Duration>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut req = self.client.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("telegram {method} request failed"))?;
        let status = resp.status();
        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .with_context(|| format!("telegram {method} returned non-JSON ({status})"))?;
        envelope.into_result(method)
    }
}

#[async_trait]
impl ChatPlatform for TelegramChat {
    async fn identity(&self) -> Result<String> {
        let me: User = self.call("getMe", &serde_json::json!({}), None).await?;
        Ok(me.username.unwrap_or(me.first_name))
    }

    async fn poll(&self, offset: Option<i64>, timeout: Duration) -> Result<Vec<Update>> {
        let body = GetUpdates {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: &["message"],
        };
        let raw: Vec<RawUpdate> = self
            .call("getUpdates", &body, Some(timeout + POLL_GRACE))
            .await?;
        Ok(raw.into_iter().map(Update::from).collect())
    }

    async fn send(&self, chat_id: i64, text: &str, keyboard: Keyboard) -> Result<()> {
        let body = SendMessage {
            chat_id,
            text,
            reply_markup: ReplyMarkup::from_keyboard(keyboard),
        };
        let _: serde_json::Value = self.call("sendMessage", &body, None).await?;
        Ok(())
    }

    async fn download(&self, photo: &PhotoRef) -> Result<Vec<u8>> {
        let file: File = self
            .call(
                "getFile",
                &serde_json::json!({ "file_id": photo.file_id }),
                None,
            )
            .await?;
        let Some(path) = file.file_path else {
            bail!("telegram returned no file path for {}", photo.file_id);
        };

        let resp = self.client.get(self.file_url(&path)).send().await?;
        if !resp.status().is_success() {
            bail!("telegram file download failed ({})", resp.status());
        }
        Ok(resp.bytes().await?.to_vec())
    }

    async fn set_commands(&self, commands: &[(&str, &str)]) -> Result<()> {
        let commands: Vec<CommandEntry> = commands
            .iter()
            .map(|&(command, description)| CommandEntry {
                command: command.trim_start_matches('/'),
                description,
            })
            .collect();
        let _: bool = self
            .call("setMyCommands", &serde_json::json!({ "commands": commands }), None)
            .await?;
        Ok(())
    }
}

// --- API types ---

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if !self.ok {
            bail!(
                "telegram {method} error ({}): {}",
                self.error_code.unwrap_or_default(),
                self.description.unwrap_or_default()
            );
        }
        match self.result {
            Some(result) => Ok(result),
            None => bail!("telegram {method} returned no result"),
        }
    }
}

#[derive(Serialize)]
struct GetUpdates<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<String>>,
        one_time_keyboard: bool,
        resize_keyboard: bool,
    },
    Remove {
        remove_keyboard: bool,
    },
}

impl ReplyMarkup {
    fn from_keyboard(keyboard: Keyboard) -> Option<Self> {
        match keyboard {
            Keyboard::Keep => None,
            Keyboard::OneTime(rows) => Some(Self::Keyboard {
                keyboard: rows,
                one_time_keyboard: true,
                resize_keyboard: true,
            }),
            Keyboard::Remove => Some(Self::Remove {
                remove_keyboard: true,
            }),
        }
    }
}

#[derive(Serialize)]
struct CommandEntry<'a> {
    command: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    from: Option<User>,
    text: Option<String>,
    photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
    first_name: String,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoSize {
    file_id: String,
    file_unique_id: String,
}

#[derive(Deserialize)]
struct File {
    file_path: Option<String>,
}

impl From<RawUpdate> for Update {
    fn from(raw: RawUpdate) -> Self {
        Self {
            id: raw.update_id,
            message: raw.message.map(IncomingMessage::from),
        }
    }
}

impl From<Message> for IncomingMessage {
    fn from(msg: Message) -> Self {
        // Sizes arrive smallest first.
        let content = match (msg.photo.and_then(|sizes| sizes.into_iter().last()), msg.text) {
            (Some(size), _) => MessageContent::Photo(PhotoRef {
                file_id: size.file_id,
                file_unique_id: size.file_unique_id,
            }),
            (None, Some(text)) => MessageContent::Text(text),
            (None, None) => MessageContent::Other,
        };
        Self {
            chat_id: msg.chat.id,
            user_id: msg.from.map(|u| u.id).unwrap_or(msg.chat.id),
            content,
        }
    }
}
