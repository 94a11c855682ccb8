use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{PublishOutcome, Publisher};
use crate::config::PublisherCredentials;

const GRAPH_URL: &str = "https://graph.facebook.com";

/// Posts photos to a Facebook page through the Graph API.
pub struct FacebookPublisher {
    client: reqwest::Client,
    credentials: PublisherCredentials,
}

impl FacebookPublisher {
    pub fn new(credentials: PublisherCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
        }
    }

    fn endpoint(&self) -> String {
        format!("{GRAPH_URL}/{}/photos", self.credentials.page_id)
    }

    fn build_request<'a>(&'a self, photo_url: &'a str, caption: &'a str) -> PhotoRequest<'a> {
        PhotoRequest {
            url: photo_url,
            caption,
            access_token: &self.credentials.access_token,
        }
    }
}

#[async_trait]
impl Publisher for FacebookPublisher {
    async fn publish(&self, photo_url: &str, caption: &str) -> Result<PublishOutcome> {
        let resp = self
            .client
            .post(self.endpoint())
            .form(&self.build_request(photo_url, caption))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(outcome(status, body))
    }

    fn label(&self) -> String {
        format!("facebook page {}", self.credentials.page_id)
    }
}

/// Only a plain 200 counts as published. The post id is taken from the
/// body when it parses, preferring `post_id` over the photo `id`.
fn outcome(status: StatusCode, body: String) -> PublishOutcome {
    if status != StatusCode::OK {
        return PublishOutcome::Rejected {
            status: status.as_u16(),
            body,
        };
    }

    let post_id = serde_json::from_str::<PhotoResponse>(&body)
        .ok()
        .and_then(|r| r.post_id.or(r.id));
    PublishOutcome::Published { post_id }
}

#[derive(Serialize)]
struct PhotoRequest<'a> {
    url: &'a str,
    caption: &'a str,
    access_token: &'a str,
}

#[derive(Deserialize)]
struct PhotoResponse {
    id: Option<String>,
    post_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> FacebookPublisher {
        FacebookPublisher::new(PublisherCredentials {
            page_id: "1234".to_string(),
            access_token: "EAAB".to_string(),
        })
    }

    #[test]
    fn endpoint_targets_page_photos() {
        assert_eq!(publisher().endpoint(), "https://graph.facebook.com/1234/photos");
    }

    #[test]
    fn request_carries_url_caption_and_token() {
        let p = publisher();
        let json = serde_json::to_value(p.build_request("https://x/1.jpg", "Pizza!")).unwrap();
        assert_eq!(json["url"], "https://x/1.jpg");
        assert_eq!(json["caption"], "Pizza!");
        assert_eq!(json["access_token"], "EAAB");
    }

    #[test]
    fn ok_with_ids_prefers_post_id() {
        let body = r#"{"id":"987","post_id":"1234_987"}"#.to_string();
        assert_eq!(
            outcome(StatusCode::OK, body),
            PublishOutcome::Published {
                post_id: Some("1234_987".to_string())
            }
        );
    }

    #[test]
    fn ok_with_only_photo_id() {
        assert_eq!(
            outcome(StatusCode::OK, r#"{"id":"987"}"#.to_string()),
            PublishOutcome::Published {
                post_id: Some("987".to_string())
            }
        );
    }

    #[test]
    fn ok_with_unparseable_body_still_published() {
        assert_eq!(
            outcome(StatusCode::OK, "<html>ok</html>".to_string()),
            PublishOutcome::Published { post_id: None }
        );
    }

    #[test]
    fn created_is_not_success() {
        assert_eq!(
            outcome(StatusCode::CREATED, r#"{"id":"987"}"#.to_string()),
            PublishOutcome::Rejected {
                status: 201,
                body: r#"{"id":"987"}"#.to_string()
            }
        );
    }

    #[test]
    fn bad_request_keeps_body() {
        let body = r#"{"error":{"message":"Invalid OAuth access token."}}"#;
        assert_eq!(
            outcome(StatusCode::BAD_REQUEST, body.to_string()),
            PublishOutcome::Rejected {
                status: 400,
                body: body.to_string()
            }
        );
    }

    #[test]
    fn label_names_page() {
        assert_eq!(publisher().label(), "facebook page 1234");
    }
}
