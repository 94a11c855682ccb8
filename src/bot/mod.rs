pub mod conversation;
pub mod replies;

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::captioner::{Captioner, split_captions};
use crate::chat::{ChatPlatform, IncomingMessage, Keyboard, PhotoRef};
use crate::commands::{command_list, help_text};
use crate::consts::{DEFAULT_POLL_TIMEOUT_SECS, PHOTO_CONTENT_TYPE};
use crate::prompts::caption_prompt;
use crate::publisher::{PublishOutcome, Publisher};
use crate::records::{NewPost, PostStore};
use crate::storage::{ObjectStore, photo_object_name};

use conversation::{ConversationState, Route, classify, route};

pub struct BotConfig {
    /// Long-poll timeout for each `getUpdates`.
    pub poll_timeout: Duration,
    /// Pause after a failed poll before trying again.
    pub error_backoff: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
            error_backoff: Duration::from_secs(5),
        }
    }
}

/// Counters for the shutdown summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub messages: u64,
    pub photos: u64,
    /// Posts that went out or were simulated; refusals and failures excluded.
    pub posts: u64,
}

/// The services the bot delegates to.
pub struct Services {
    pub chat: Arc<dyn ChatPlatform>,
    pub store: Arc<dyn ObjectStore>,
    pub captioner: Arc<dyn Captioner>,
    pub posts: Arc<dyn PostStore>,
    pub publisher: Arc<dyn Publisher>,
}

/// The photo → captions → post workflow. Wires the services to the
/// per-user conversation state.
pub struct Bot {
    services: Services,
    config: BotConfig,
    sessions: HashMap<i64, ConversationState>,
    offset: Option<i64>,
    stats: SessionStats,
}

impl Bot {
    pub fn new(services: Services, config: BotConfig) -> Self {
        Self {
            services,
            config,
            sessions: HashMap::new(),
            offset: None,
            stats: SessionStats::default(),
        }
    }

    /// Current state for a user; `None` when no conversation is active.
    pub fn state(&self, user_id: i64) -> Option<ConversationState> {
        self.sessions.get(&user_id).copied()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Publish the command list to the chat platform.
    pub async fn register_commands(&self) -> Result<()> {
        self.services.chat.set_commands(&command_list()).await
    }

    /// Poll forever. Failed polls are logged and retried after a pause.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            if let Err(e) = self.poll_once().await {
                tracing::warn!(error = %e, "poll failed");
                tokio::time::sleep(self.config.error_backoff).await;
            }
        }
    }

    /// Fetch one batch of updates and handle them in order. Returns how
    /// many updates were consumed.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self
            .services
            .chat
            .poll(self.offset, self.config.poll_timeout)
            .await?;

        for update in &updates {
            self.offset = Some(update.id + 1);
            let Some(message) = &update.message else {
                continue;
            };
            if let Err(e) = self.handle(message).await {
                tracing::warn!(update_id = update.id, chat_id = message.chat_id, error = %e, "failed to handle message");
            }
        }
        Ok(updates.len())
    }

    /// Handle one message. Collaborator failures are reported to the user;
    /// only failures to reply come back as `Err`.
    pub async fn handle(&mut self, message: &IncomingMessage) -> Result<()> {
        let user_id = message.user_id;
        let state = self.state(user_id);
        let input = classify(&message.content);
        let route = route(state, &input);
        self.stats.messages += 1;

        tracing::debug!(chat_id = message.chat_id, user_id, ?state, ?route, "routing message");

        let next = match (route, input) {
            (Route::Ignore, _) => return Ok(()),
            (Route::Help, _) => {
                self.reply(message.chat_id, &help_text(), Keyboard::Keep)
                    .await?;
                return Ok(());
            }
            (Route::Greet, _) => {
                self.reply(message.chat_id, replies::GREETING, Keyboard::Keep)
                    .await?;
                Some(ConversationState::AwaitingPhoto)
            }
            (Route::ReceivePhoto, conversation::Input::Photo(photo)) => {
                self.stats.photos += 1;
                self.receive_photo(message, photo).await?
            }
            (Route::Publish(choice), _) => self.publish(message, choice).await?,
            (Route::Reprompt, _) => {
                self.reply(
                    message.chat_id,
                    replies::PICK_ONE,
                    Keyboard::OneTime(replies::choice_keyboard()),
                )
                .await?;
                state
            }
            (Route::Cancel, _) => {
                self.reply(message.chat_id, replies::CANCELLED, Keyboard::Remove)
                    .await?;
                None
            }
            (Route::ReceivePhoto, _) => return Ok(()),
        };

        if next != state {
            tracing::info!(user_id, from = ?state, to = ?next, "conversation state changed");
        }
        match next {
            Some(s) => self.sessions.insert(user_id, s),
            None => self.sessions.remove(&user_id),
        };
        Ok(())
    }

    /// Upload, caption, record, and show the menu.
    async fn receive_photo(
        &self,
        message: &IncomingMessage,
        photo: &PhotoRef,
    ) -> Result<Option<ConversationState>> {
        let chat_id = message.chat_id;
        let user_id = message.user_id;
        self.reply(chat_id, replies::RECEIVED, Keyboard::Keep).await?;

        let bytes = match self.services.chat.download(photo).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "photo download failed");
                self.reply(chat_id, &replies::download_failed(&e), Keyboard::Keep)
                    .await?;
                return Ok(None);
            }
        };

        let name = photo_object_name(user_id, &photo.file_unique_id);
        let photo_url = match self
            .services
            .store
            .upload(&name, &bytes, PHOTO_CONTENT_TYPE)
            .await
        {
            Ok(()) => self.services.store.public_url(&name),
            Err(e) => {
                tracing::warn!(user_id, object = %name, error = %e, "upload failed");
                self.reply(chat_id, &replies::upload_failed(&e), Keyboard::Keep)
                    .await?;
                return Ok(None);
            }
        };

        let raw = match self.services.captioner.suggest(&bytes, &caption_prompt()).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "caption generation failed");
                self.reply(chat_id, &replies::captions_failed(&e), Keyboard::Keep)
                    .await?;
                return Ok(None);
            }
        };
        let options = split_captions(&raw);

        let post = NewPost::pending(user_id, photo_url, options.clone());
        match self.services.posts.insert(post).await {
            Ok(record_id) => tracing::info!(user_id, record_id, "captions stored"),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to store captions");
                self.reply(chat_id, &replies::save_failed(&e), Keyboard::Keep)
                    .await?;
                return Ok(None);
            }
        }

        self.reply(
            chat_id,
            &replies::menu(&options),
            Keyboard::OneTime(replies::choice_keyboard()),
        )
        .await?;
        Ok(Some(ConversationState::AwaitingChoice))
    }

    /// Post the chosen caption of the user's latest photo.
    async fn publish(
        &mut self,
        message: &IncomingMessage,
        choice: usize,
    ) -> Result<Option<ConversationState>> {
        let chat_id = message.chat_id;
        let user_id = message.user_id;
        self.reply(chat_id, &replies::publishing(choice), Keyboard::Remove)
            .await?;

        let record = match self.services.posts.latest_for(user_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.reply(chat_id, replies::NOT_FOUND, Keyboard::Keep).await?;
                return Ok(Some(ConversationState::AwaitingPhoto));
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "record lookup failed");
                self.reply(chat_id, &replies::lookup_failed(&e), Keyboard::Keep)
                    .await?;
                return Ok(Some(ConversationState::AwaitingPhoto));
            }
        };

        let Some(caption) = record.caption(choice) else {
            self.reply(chat_id, replies::NOT_FOUND, Keyboard::Keep).await?;
            return Ok(Some(ConversationState::AwaitingPhoto));
        };

        let text = match self
            .services
            .publisher
            .publish(&record.photo_url, caption)
            .await
        {
            Ok(PublishOutcome::Published { post_id }) => {
                tracing::info!(user_id, record_id = record.id, ?post_id, "published");
                self.stats.posts += 1;
                replies::PUBLISHED.to_string()
            }
            Ok(PublishOutcome::Rejected { status, body }) => {
                tracing::warn!(user_id, record_id = record.id, status, "post rejected");
                replies::rejected(&body)
            }
            Ok(PublishOutcome::Simulated) => {
                self.stats.posts += 1;
                replies::SIMULATED.to_string()
            }
            Err(e) => {
                tracing::warn!(user_id, record_id = record.id, error = %e, "post failed");
                replies::connection_failed(&e)
            }
        };
        self.reply(chat_id, &text, Keyboard::Keep).await?;
        self.reply(chat_id, replies::DONE, Keyboard::Keep).await?;
        Ok(Some(ConversationState::AwaitingPhoto))
    }

    async fn reply(&self, chat_id: i64, text: &str, keyboard: Keyboard) -> Result<()> {
        self.services.chat.send(chat_id, text, keyboard).await
    }
}
