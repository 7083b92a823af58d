//! Telegram Bot API wire types.

use serde::{Deserialize, Serialize};

/// Bot token and endpoint, fixed at construction.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    /// Endpoint with scheme and trailing slash, e.g. `https://api.telegram.org/`.
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub can_join_groups: Option<bool>,
    pub can_read_all_group_messages: Option<bool>,
    pub supports_inline_queries: Option<bool>,
}

/// Offset annotation within a message's text (e.g. a command token).
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEntity {
    /// Entity type: "bot_command", "mention", etc.
    #[serde(rename = "type")]
    pub entity_type: String,
    pub offset: i64,
    pub length: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub date: i64,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    pub chat: Chat,
    pub text: Option<String>,
}

impl Message {
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

impl Update {
    /// Text preview for log lines; empty when the update carries no message.
    pub fn message_text(&self) -> &str {
        self.message
            .as_ref()
            .map(|m| m.text_or_empty())
            .unwrap_or("")
    }
}

/// Bot API response envelope: `{ok, result, description}`.
///
/// `ok` defaults to true so a bare `{"result": …}` body still decodes.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default = "default_ok")]
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

fn default_ok() -> bool {
    true
}

/// JSON body for `sendMessage`.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}
