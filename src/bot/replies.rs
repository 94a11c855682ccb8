//! Texts the bot sends.

use crate::captioner::{CaptionOptions, preview};
use crate::consts::{CANCEL_LABEL, PREVIEW_CHARS};

pub const GREETING: &str =
    "🍕 Hi boss! I'm Nano Banana. Send me a photo of the pizza and I'll give you ideas.";
pub const RECEIVED: &str = "👀 Got it. Uploading to the cloud and thinking up ideas...";
pub const PICK_ONE: &str = "Pick 1, 2 or 3.";
pub const NOT_FOUND: &str = "I couldn't find the photo. Send it again.";
pub const PUBLISHED: &str = "✅ Published to Facebook!";
pub const SIMULATED: &str = "⚠️ Simulation mode: no Facebook token configured. The caption and photo are ready though.";
pub const DONE: &str = "🎉 All done, boss! Send me another pizza.";
pub const CANCELLED: &str = "Cancelled.";

pub fn upload_failed(err: &anyhow::Error) -> String {
    format!("Error uploading image: {err}")
}

pub fn download_failed(err: &anyhow::Error) -> String {
    format!("Error downloading photo: {err}")
}

pub fn captions_failed(err: &anyhow::Error) -> String {
    format!("Error generating captions: {err}")
}

pub fn save_failed(err: &anyhow::Error) -> String {
    format!("Error saving captions: {err}")
}

pub fn lookup_failed(err: &anyhow::Error) -> String {
    format!("Error loading your photo: {err}")
}

pub fn publishing(choice: usize) -> String {
    format!("🚀 Publishing option {choice}...")
}

pub fn rejected(body: &str) -> String {
    format!("⚠️ Facebook error: {body}")
}

pub fn connection_failed(err: &anyhow::Error) -> String {
    format!("Connection error with Facebook: {err}")
}

/// The choice menu: each option previewed, then the prompt to pick.
pub fn menu(options: &CaptionOptions) -> String {
    let [o1, o2, o3] = options.as_array();
    format!(
        "🍌 Nano Banana ideas:\n\n1️⃣: {}...\n\n2️⃣: {}...\n\n3️⃣: {}...\n\n👇 Choose 1, 2 or 3:",
        preview(o1, PREVIEW_CHARS),
        preview(o2, PREVIEW_CHARS),
        preview(o3, PREVIEW_CHARS),
    )
}

/// Buttons shown with the menu.
pub fn choice_keyboard() -> Vec<Vec<String>> {
    vec![
        vec!["1".to_string(), "2".to_string(), "3".to_string()],
        vec![CANCEL_LABEL.to_string()],
    ]
}
