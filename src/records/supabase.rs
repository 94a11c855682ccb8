use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{NewPost, PostRecord, PostStore};
use crate::captioner::CaptionOptions;
use crate::consts::POSTS_TABLE;

/// Record store backed by a Supabase table through its REST interface.
pub struct SupabasePosts {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl SupabasePosts {
    pub fn new(base_url: &str, key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, POSTS_TABLE)
    }

    fn latest_url(&self, chat_id: i64) -> String {
        format!(
            "{}?select=*&chat_id=eq.{}&order=id.desc&limit=1",
            self.table_url(),
            chat_id
        )
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.key).header("apikey", &self.key)
    }
}

#[async_trait]
impl PostStore for SupabasePosts {
    async fn insert(&self, post: NewPost) -> Result<i64> {
        let row = Row::from(post);
        let resp = self
            .authed(self.client.post(self.table_url()))
            .header("prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("insert into {POSTS_TABLE} failed ({}): {}", status, text);
        }

        let rows: Vec<StoredRow> = resp
            .json()
            .await
            .context("unexpected insert response")?;
        match rows.into_iter().next() {
            Some(stored) => Ok(stored.id),
            None => bail!("insert into {POSTS_TABLE} returned no rows"),
        }
    }

    async fn latest_for(&self, chat_id: i64) -> Result<Option<PostRecord>> {
        let resp = self
            .authed(self.client.get(self.latest_url(chat_id)))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("select from {POSTS_TABLE} failed ({}): {}", status, text);
        }

        let rows: Vec<StoredRow> = resp.json().await.context("unexpected select response")?;
        Ok(rows.into_iter().next().map(PostRecord::from))
    }
}

// --- Table row types. Column names follow the existing table. ---

#[derive(Serialize)]
struct Row {
    chat_id: i64,
    photo_url: String,
    #[serde(rename = "opcion_1")]
    option_1: String,
    #[serde(rename = "opcion_2")]
    option_2: String,
    #[serde(rename = "opcion_3")]
    option_3: String,
    #[serde(rename = "estado")]
    status: String,
}

impl From<NewPost> for Row {
    fn from(post: NewPost) -> Self {
        let [option_1, option_2, option_3] = post.options.into_array();
        Self {
            chat_id: post.chat_id,
            photo_url: post.photo_url,
            option_1,
            option_2,
            option_3,
            status: post.status,
        }
    }
}

#[derive(Deserialize)]
struct StoredRow {
    id: i64,
    chat_id: i64,
    photo_url: String,
    #[serde(rename = "opcion_1")]
    option_1: String,
    #[serde(rename = "opcion_2")]
    option_2: String,
    #[serde(rename = "opcion_3")]
    option_3: String,
    #[serde(rename = "estado", default)]
    status: String,
    created_at: Option<String>,
}

impl From<StoredRow> for PostRecord {
    fn from(row: StoredRow) -> Self {
        Self {
            id: row.id,
            chat_id: row.chat_id,
            photo_url: row.photo_url,
            options: CaptionOptions::new(row.option_1, row.option_2, row.option_3),
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captioner::split_captions;

    #[test]
    fn latest_url_orders_newest_first() {
        let posts = SupabasePosts::new("https://abc.supabase.co/", "k");
        assert_eq!(
            posts.latest_url(42),
            "https://abc.supabase.co/rest/v1/publicaciones?select=*&chat_id=eq.42&order=id.desc&limit=1"
        );
    }

    #[test]
    fn row_uses_table_column_names() {
        let row = Row::from(NewPost::pending(9, "https://x/9.jpg", split_captions("a|||b|||c")));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["chat_id"], 9);
        assert_eq!(json["opcion_1"], "a");
        assert_eq!(json["opcion_3"], "c");
        assert_eq!(json["estado"], "pending");
    }

    #[test]
    fn stored_row_converts_to_record() {
        let json = r#"[{
            "id": 3, "chat_id": 9, "photo_url": "https://x/9.jpg",
            "opcion_1": "a", "opcion_2": "b", "opcion_3": "c",
            "estado": "esperando", "created_at": "2024-05-01T10:00:00+00:00"
        }]"#;
        let rows: Vec<StoredRow> = serde_json::from_str(json).unwrap();
        let rec = PostRecord::from(rows.into_iter().next().unwrap());
        assert_eq!(rec.id, 3);
        assert_eq!(rec.caption(3), Some("c"));
        assert_eq!(rec.status, "esperando");
    }
}
