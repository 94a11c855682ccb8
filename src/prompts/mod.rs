pub mod caption;

pub use caption::caption_prompt;
