use std::collections::HashMap;

use nanobanana::config::{
    ENV_FACEBOOK_PAGE, ENV_GEMINI_KEY, ENV_GEMINI_MODEL, ENV_META_TOKEN, ENV_SUPABASE_BUCKET,
    ENV_SUPABASE_KEY, ENV_SUPABASE_URL, ENV_TELEGRAM_TOKEN, PublisherCredentials, Settings,
};

fn settings(pairs: &[(&str, &str)]) -> Settings {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn full_environment_is_read() {
    let s = settings(&[
        (ENV_TELEGRAM_TOKEN, "123:abc"),
        (ENV_GEMINI_KEY, "gk"),
        (ENV_GEMINI_MODEL, "gemini-2.0-flash"),
        (ENV_SUPABASE_URL, "https://proj.supabase.co"),
        (ENV_SUPABASE_KEY, "sk"),
        (ENV_SUPABASE_BUCKET, "photos"),
        (ENV_META_TOKEN, "mt"),
        (ENV_FACEBOOK_PAGE, "42"),
    ]);

    assert_eq!(s.require_telegram_token().unwrap(), "123:abc");
    assert_eq!(s.require_gemini_key().unwrap(), "gk");
    assert_eq!(s.gemini_model, "gemini-2.0-flash");
    assert_eq!(
        s.require_supabase().unwrap(),
        ("https://proj.supabase.co", "sk")
    );
    assert_eq!(s.bucket, "photos");
    assert_eq!(
        s.publisher_credentials(),
        Some(PublisherCredentials {
            page_id: "42".to_string(),
            access_token: "mt".to_string(),
        })
    );
}

#[test]
fn publishing_needs_both_page_and_token() {
    assert!(settings(&[(ENV_META_TOKEN, "mt")]).publisher_credentials().is_none());
    assert!(settings(&[(ENV_FACEBOOK_PAGE, "42")]).publisher_credentials().is_none());
    assert!(
        settings(&[(ENV_FACEBOOK_PAGE, "42"), (ENV_META_TOKEN, " ")])
            .publisher_credentials()
            .is_none()
    );
}

#[test]
fn values_are_trimmed() {
    let s = settings(&[(ENV_GEMINI_KEY, "  gk\n")]);
    assert_eq!(s.require_gemini_key().unwrap(), "gk");
}

#[test]
fn missing_supabase_url_is_named() {
    let err = settings(&[(ENV_SUPABASE_KEY, "sk")])
        .require_supabase()
        .unwrap_err();
    assert!(err.to_string().contains(ENV_SUPABASE_URL));
}
