//! Runtime settings read from the environment.
//!
//! Every external service is configured through a variable. Lookups go
//! through a closure so tests can feed a fixed map instead of touching the
//! process environment. Empty values count as unset.

use anyhow::{Result, bail};

use crate::consts::{DEFAULT_BUCKET, DEFAULT_MODEL};

pub const ENV_TELEGRAM_TOKEN: &str = "TOKEN_TELEGRAM";
pub const ENV_GEMINI_KEY: &str = "API_KEY_GEMINI";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";
pub const ENV_SUPABASE_BUCKET: &str = "SUPABASE_BUCKET";
pub const ENV_META_TOKEN: &str = "META_ACCESS_TOKEN";
pub const ENV_FACEBOOK_PAGE: &str = "ID_PAGINA_FACEBOOK";

/// Credentials for posting to a Facebook page.
#[derive(Debug, Clone, PartialEq)]
pub struct PublisherCredentials {
    pub page_id: String,
    pub access_token: String,
}

/// Everything the bot needs to reach its collaborators.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub telegram_token: Option<String>,
    pub gemini_key: Option<String>,
    pub gemini_model: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub bucket: String,
    pub meta_access_token: Option<String>,
    pub facebook_page_id: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            telegram_token: get(ENV_TELEGRAM_TOKEN),
            gemini_key: get(ENV_GEMINI_KEY),
            gemini_model: get(ENV_GEMINI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            supabase_url: get(ENV_SUPABASE_URL).map(|u| u.trim_end_matches('/').to_string()),
            supabase_key: get(ENV_SUPABASE_KEY),
            bucket: get(ENV_SUPABASE_BUCKET).unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            meta_access_token: get(ENV_META_TOKEN),
            facebook_page_id: get(ENV_FACEBOOK_PAGE),
        }
    }

    /// Facebook credentials, only when both the page id and token are set.
    pub fn publisher_credentials(&self) -> Option<PublisherCredentials> {
        match (&self.facebook_page_id, &self.meta_access_token) {
            (Some(page_id), Some(access_token)) => Some(PublisherCredentials {
                page_id: page_id.clone(),
                access_token: access_token.clone(),
            }),
            _ => None,
        }
    }

    pub fn require_telegram_token(&self) -> Result<&str> {
        match self.telegram_token.as_deref() {
            Some(token) => Ok(token),
            None => bail!("{ENV_TELEGRAM_TOKEN} is not set"),
        }
    }

    pub fn require_gemini_key(&self) -> Result<&str> {
        match self.gemini_key.as_deref() {
            Some(key) => Ok(key),
            None => bail!("{ENV_GEMINI_KEY} is not set"),
        }
    }

    /// Supabase project URL and service key.
    pub fn require_supabase(&self) -> Result<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.supabase_key.as_deref()) {
            (Some(url), Some(key)) => Ok((url, key)),
            (None, _) => bail!("{ENV_SUPABASE_URL} is not set"),
            (_, None) => bail!("{ENV_SUPABASE_KEY} is not set"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let s = settings(&[]);
        assert!(s.telegram_token.is_none());
        assert_eq!(s.gemini_model, DEFAULT_MODEL);
        assert_eq!(s.bucket, DEFAULT_BUCKET);
        assert!(s.publisher_credentials().is_none());
    }

    #[test]
    fn empty_values_count_as_unset() {
        let s = settings(&[(ENV_TELEGRAM_TOKEN, ""), (ENV_GEMINI_MODEL, "  ")]);
        assert!(s.telegram_token.is_none());
        assert_eq!(s.gemini_model, DEFAULT_MODEL);
    }

    #[test]
    fn supabase_url_trailing_slash_stripped() {
        let s = settings(&[(ENV_SUPABASE_URL, "https://x.supabase.co/")]);
        assert_eq!(s.supabase_url.as_deref(), Some("https://x.supabase.co"));
    }

    #[test]
    fn require_supabase_names_missing_key() {
        let s = settings(&[(ENV_SUPABASE_URL, "https://x.supabase.co")]);
        let err = s.require_supabase().unwrap_err();
        assert!(err.to_string().contains(ENV_SUPABASE_KEY));
    }

    #[test]
    fn require_telegram_token_errors_when_missing() {
        let err = settings(&[]).require_telegram_token().unwrap_err();
        assert!(err.to_string().contains(ENV_TELEGRAM_TOKEN));
    }
}
