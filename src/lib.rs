pub mod banner;
pub mod bot;
pub mod captioner;
pub mod chat;
pub mod commands;
pub mod config;
pub mod consts;
pub mod prompts;
pub mod publisher;
pub mod records;
pub mod storage;
