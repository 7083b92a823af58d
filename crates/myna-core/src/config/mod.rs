mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::MynaError;
use defaults::*;

/// Top-level Myna configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub state: StateConfig,
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// File whose first line is the bot token.
    #[serde(default = "default_token_file")]
    pub token_file: String,
    #[serde(default)]
    pub transport: TransportMode,
    /// Explicit endpoint override, scheme and trailing slash included.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Long-poll hold in seconds; 0 means polls return immediately.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            transport: TransportMode::default(),
            api_url: None,
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

impl TelegramConfig {
    /// Resolve the API endpoint: an explicit `api_url` wins, otherwise the
    /// transport mode picks the scheme of the public endpoint.
    pub fn endpoint(&self) -> String {
        match &self.api_url {
            Some(url) => url.clone(),
            None => self.transport.default_endpoint().to_string(),
        }
    }

    /// Long-poll hold as the client expects it; zero disables long polling.
    pub fn poll_timeout(&self) -> Option<u64> {
        if self.poll_timeout_secs == 0 {
            None
        } else {
            Some(self.poll_timeout_secs)
        }
    }
}

/// Transport mode -- plain or encrypted HTTP to the Bot API.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Plain HTTP, for local fakes and debugging proxies.
    Http,
    /// TLS (default).
    #[default]
    Https,
}

impl TransportMode {
    /// The public Bot API endpoint under this mode's scheme.
    pub fn default_endpoint(&self) -> &str {
        match self {
            Self::Http => "http://api.telegram.org/",
            Self::Https => "https://api.telegram.org/",
        }
    }

    /// Human-readable name for display (e.g. in `status`).
    pub fn display_name(&self) -> &str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Persisted state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// File holding the last acknowledged update_id as a decimal.
    #[serde(default = "default_offset_file")]
    pub offset_file: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            offset_file: default_offset_file(),
        }
    }
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load(path: &str) -> Result<Config, MynaError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| MynaError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| MynaError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}

/// Read the bot token: the first line of the file at `path`, trimmed.
pub fn read_token(path: &str) -> Result<String, MynaError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MynaError::Config(format!("failed to read token file {path}: {e}")))?;

    let token = content.lines().next().unwrap_or("").trim();
    if token.is_empty() {
        return Err(MynaError::Config(format!("token file {path} is empty")));
    }
    Ok(token.to_string())
}
