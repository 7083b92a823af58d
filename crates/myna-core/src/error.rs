use thiserror::Error;

/// Top-level error type for Myna.
#[derive(Debug, Error)]
pub enum MynaError {
    /// Network failure before any response was obtained.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status from the Bot API.
    #[error("api error: method={method} status={status}")]
    Api { method: String, status: u16 },

    /// 2xx body that does not decode into the expected envelope.
    #[error("malformed response from {method}: {detail}")]
    MalformedResponse { method: String, detail: String },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Offset cursor persistence error.
    #[error("offset store error: {0}")]
    OffsetStore(String),

    /// Error from a message handler.
    #[error("handler error: {0}")]
    Handler(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
