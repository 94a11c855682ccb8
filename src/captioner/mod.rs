pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

use crate::consts::{CAPTION_DELIMITER, PLACEHOLDER_OPTION_2, PLACEHOLDER_OPTION_3};

/// An image in, free text out. Could be Gemini, another model, or a test script.
#[async_trait]
pub trait Captioner: Send + Sync {
    /// Ask for caption ideas for `image` (JPEG bytes) following `prompt`.
    async fn suggest(&self, image: &[u8], prompt: &str) -> Result<String>;
}

/// The three caption options offered to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionOptions([String; 3]);

impl CaptionOptions {
    pub fn new(first: String, second: String, third: String) -> Self {
        Self([first, second, third])
    }

    /// Option by 1-based number.
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .map(String::as_str)
    }

    pub fn as_array(&self) -> &[String; 3] {
        &self.0
    }

    pub fn into_array(self) -> [String; 3] {
        self.0
    }
}

/// Split a captioner response into three options.
///
/// A well-formed response has at least three non-empty parts separated by
/// [`CAPTION_DELIMITER`]; extra parts are dropped. Anything else keeps the
/// whole text as option 1 and fills the rest with placeholders.
pub fn split_captions(text: &str) -> CaptionOptions {
    let parts: Vec<&str> = text
        .split(CAPTION_DELIMITER)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if let [first, second, third, ..] = parts.as_slice() {
        return CaptionOptions::new(first.to_string(), second.to_string(), third.to_string());
    }

    CaptionOptions::new(
        text.trim().to_string(),
        PLACEHOLDER_OPTION_2.to_string(),
        PLACEHOLDER_OPTION_3.to_string(),
    )
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_response_yields_three_trimmed_options() {
        let opts = split_captions("Hot and fresh! ||| Cheese pull heaven ||| Friday = pizza");
        assert_eq!(opts.get(1), Some("Hot and fresh!"));
        assert_eq!(opts.get(2), Some("Cheese pull heaven"));
        assert_eq!(opts.get(3), Some("Friday = pizza"));
    }

    #[test]
    fn extra_parts_are_dropped() {
        let opts = split_captions("a|||b|||c|||d");
        assert_eq!(opts.as_array(), &["a", "b", "c"].map(String::from));
    }

    #[test]
    fn empty_parts_are_skipped() {
        let opts = split_captions("|||a|||\n|||b|||c");
        assert_eq!(opts.as_array(), &["a", "b", "c"].map(String::from));
    }

    #[test]
    fn missing_delimiter_falls_back_to_placeholders() {
        let opts = split_captions("  One long caption without separators  ");
        assert_eq!(opts.get(1), Some("One long caption without separators"));
        assert_eq!(opts.get(2), Some(PLACEHOLDER_OPTION_2));
        assert_eq!(opts.get(3), Some(PLACEHOLDER_OPTION_3));
    }

    #[test]
    fn two_parts_fall_back_to_whole_text() {
        let opts = split_captions("first ||| second");
        assert_eq!(opts.get(1), Some("first ||| second"));
        assert_eq!(opts.get(2), Some(PLACEHOLDER_OPTION_2));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let opts = split_captions("a|||b|||c");
        assert_eq!(opts.get(0), None);
        assert_eq!(opts.get(4), None);
    }

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("pizza", 100), "pizza");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("🍕🍕🍕", 2), "🍕🍕");
        assert_eq!(preview("abcdef", 3), "abc");
    }
}
