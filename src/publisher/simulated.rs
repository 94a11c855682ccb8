use anyhow::Result;
use async_trait::async_trait;

use super::{PublishOutcome, Publisher};

/// Stand-in used without page credentials or with `--dry-run`.
pub struct SimulatedPublisher;

#[async_trait]
impl Publisher for SimulatedPublisher {
    async fn publish(&self, photo_url: &str, caption: &str) -> Result<PublishOutcome> {
        tracing::info!(photo_url, caption_len = caption.len(), "simulated post");
        Ok(PublishOutcome::Simulated)
    }

    fn label(&self) -> String {
        "simulation (nothing is posted)".to_string()
    }
}
