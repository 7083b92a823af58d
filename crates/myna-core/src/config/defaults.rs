//! Default value functions used by serde for config deserialization.

pub fn default_token_file() -> String {
    "telegram_token.txt".to_string()
}

pub fn default_offset_file() -> String {
    "backup_offset.data".to_string()
}

pub fn default_poll_timeout() -> u64 {
    30
}
