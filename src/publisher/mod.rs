pub mod facebook;
pub mod mock;
pub mod simulated;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::PublisherCredentials;
use facebook::FacebookPublisher;
use simulated::SimulatedPublisher;

/// What happened when a post was attempted.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// The platform accepted the post.
    Published { post_id: Option<String> },
    /// The platform answered but refused the post.
    Rejected { status: u16, body: String },
    /// No credentials configured; nothing was sent.
    Simulated,
}

/// A social page that can take a photo URL and a caption.
///
/// Transport failures are `Err`; refusals from the platform are
/// [`PublishOutcome::Rejected`].
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, photo_url: &str, caption: &str) -> Result<PublishOutcome>;

    /// Short label for the startup banner.
    fn label(&self) -> String;
}

/// The Facebook publisher when credentials are present and posting is not
/// suppressed; the simulated one otherwise.
pub fn select(credentials: Option<PublisherCredentials>, dry_run: bool) -> Arc<dyn Publisher> {
    match credentials {
        Some(credentials) if !dry_run => Arc::new(FacebookPublisher::new(credentials)),
        _ => Arc::new(SimulatedPublisher),
    }
}
