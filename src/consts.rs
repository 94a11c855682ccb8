//! Project-wide constants.

use std::path::PathBuf;

/// Default Gemini model used for caption suggestions.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default storage bucket for uploaded photos.
pub const DEFAULT_BUCKET: &str = "fotos-pizza";

/// Table holding one row per uploaded photo.
pub const POSTS_TABLE: &str = "publicaciones";

/// Separator the captioner is asked to put between its three options.
pub const CAPTION_DELIMITER: &str = "|||";

/// Filler for option 2 when the captioner ignores the delimiter.
pub const PLACEHOLDER_OPTION_2: &str = "Generic option 2";

/// Filler for option 3 when the captioner ignores the delimiter.
pub const PLACEHOLDER_OPTION_3: &str = "Generic option 3";

/// How many characters of each option are shown in the choice menu.
pub const PREVIEW_CHARS: usize = 100;

/// Status marker written with every new record.
pub const STATUS_PENDING: &str = "pending";

/// Label of the keyboard button that cancels the conversation.
pub const CANCEL_LABEL: &str = "Cancel";

/// Content type used for every uploaded photo.
pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Long-poll timeout for fetching chat updates, in seconds.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Default database path: `~/.nanobanana/nanobanana.db`.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".nanobanana")
        .join("nanobanana.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!DEFAULT_MODEL.is_empty());
        assert!(!DEFAULT_BUCKET.is_empty());
        assert!(!CAPTION_DELIMITER.is_empty());
        assert!(!CANCEL_LABEL.is_empty());
    }

    #[test]
    fn default_db_path_ends_with_db_file() {
        let path = default_db_path();
        assert!(path.ends_with(".nanobanana/nanobanana.db"));
    }
}
