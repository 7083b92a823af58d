//! # myna-telegram
//!
//! Telegram Bot API client: typed wire entities and the three calls the bot
//! makes (`getMe`, `getUpdates`, `sendMessage`).
//! Docs: <https://core.telegram.org/bots/api>

pub mod client;
pub mod types;


pub use client::Client;
pub use types::{Chat, Credentials, Message, MessageEntity, SendMessageRequest, Update, User};
