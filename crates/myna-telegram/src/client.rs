//! Bot API calls: `getMe`, `getUpdates`, `sendMessage`.

use crate::types::{ApiResponse, Credentials, Message, SendMessageRequest, Update, User};
use myna_core::error::MynaError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, info, warn};

/// Headroom added to the long-poll hold so the client-side timeout fires
/// after the server has given up, not before.
const LONG_POLL_SLACK_SECS: u64 = 5;

/// Stateless Bot API client. One HTTP request per call; the update loop owns
/// all retry behavior.
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
}

impl Client {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}bot{}/{}",
            self.credentials.api_url, self.credentials.token, method
        )
    }

    /// `getMe` -- the bot's own identity.
    pub async fn get_me(&self) -> Result<User, MynaError> {
        info!("getMe request");
        let resp = self
            .http
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(|e| MynaError::Transport(format!("getMe failed: {e}")))?;

        read_result("getMe", resp).await
    }

    /// `getUpdates` -- poll for new updates, holding the connection open for
    /// up to `timeout` seconds. Query parameters are attached only when
    /// present, timeout before offset.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Option<u64>,
    ) -> Result<Vec<Update>, MynaError> {
        info!("getting updates with offset: {}", fmt_opt(offset));

        let mut request = self.http.get(self.method_url("getUpdates"));
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(secs) = timeout {
            query.push(("timeout", secs.to_string()));
            request = request.timeout(Duration::from_secs(secs + LONG_POLL_SLACK_SECS));
        }
        if let Some(off) = offset {
            query.push(("offset", off.to_string()));
        }

        let resp = request
            .query(&query)
            .send()
            .await
            .map_err(|e| MynaError::Transport(format!("getUpdates failed: {e}")))?;

        let raw: Vec<serde_json::Value> = read_result("getUpdates", resp).await?;

        let mut updates = Vec::with_capacity(raw.len());
        for value in raw {
            let update_id = value.get("update_id").and_then(|id| id.as_i64());
            match serde_json::from_value::<Update>(value) {
                Ok(update) => updates.push(update),
                // Unusable payload; keep the id so the cursor still advances
                // past it instead of re-fetching it forever.
                Err(e) => match update_id {
                    Some(update_id) => {
                        warn!("keeping malformed update {update_id} without message: {e}");
                        updates.push(Update {
                            update_id,
                            message: None,
                        });
                    }
                    None => error!("dropping update without update_id: {e}"),
                },
            }
        }

        info!("got {} updates", updates.len());
        Ok(updates)
    }

    /// `sendMessage` -- post a text reply, optionally threaded onto an
    /// earlier message.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message, MynaError> {
        info!("sending message to {chat_id}: {text}");

        let body = SendMessageRequest {
            chat_id,
            text,
            reply_to_message_id: reply_to,
        };

        let resp = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| MynaError::Transport(format!("sendMessage failed: {e}")))?;

        read_result("sendMessage", resp).await
    }
}

/// Shared envelope handling: a non-2xx status is definitive failure before
/// the body is touched; a 2xx body must decode to `{ok: true, result: …}`.
async fn read_result<T: DeserializeOwned>(
    method: &str,
    resp: reqwest::Response,
) -> Result<T, MynaError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(MynaError::Api {
            method: method.to_string(),
            status: status.as_u16(),
        });
    }

    let body: ApiResponse<T> = resp.json().await.map_err(|e| MynaError::MalformedResponse {
        method: method.to_string(),
        detail: e.to_string(),
    })?;

    if !body.ok {
        return Err(MynaError::MalformedResponse {
            method: method.to_string(),
            detail: body.description.unwrap_or_else(|| "ok=false".to_string()),
        });
    }

    body.result.ok_or_else(|| MynaError::MalformedResponse {
        method: method.to_string(),
        detail: "missing result".to_string(),
    })
}

fn fmt_opt(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string())
}
