use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Mutex;

use super::{PublishOutcome, Publisher};

/// A scripted publisher for tests. Records every post it is asked to make.
pub struct MockPublisher {
    outcome: Result<PublishOutcome, String>,
    posts: Mutex<Vec<(String, String)>>,
}

impl MockPublisher {
    pub fn new(outcome: PublishOutcome) -> Self {
        Self {
            outcome: Ok(outcome),
            posts: Mutex::new(Vec::new()),
        }
    }

    /// A publisher whose every call fails at the transport level.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            posts: Mutex::new(Vec::new()),
        }
    }

    /// `(photo_url, caption)` pairs in call order.
    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, photo_url: &str, caption: &str) -> Result<PublishOutcome> {
        self.posts
            .lock()
            .unwrap()
            .push((photo_url.to_string(), caption.to_string()));
        match &self.outcome {
            Ok(outcome) => Ok(outcome.clone()),
            Err(message) => bail!("{message}"),
        }
    }

    fn label(&self) -> String {
        "mock".to_string()
    }
}
