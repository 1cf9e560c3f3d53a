//! Telegram Bot API chat transport

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::Credentials;
use crate::io::HttpClient;
use crate::notifier::ChatTransport;
use crate::BotError;

/// Reply envelope of the Bot API
#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one chat through a bot
pub struct TelegramTransport {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramTransport")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramTransport {
    pub fn new(api_url: &str, credentials: &Credentials, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            api_url.trim_end_matches('/'),
            credentials.telegram_token
        );

        tracing::debug!("Created TelegramTransport for chat {}", credentials.chat_id);

        Self {
            send_url,
            chat_id: credentials.chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, text: &str) -> crate::Result<()> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .http
            .post_json(&self.send_url, &body)
            .await
            .map_err(|e| BotError::FatalNotify(e.to_string()))?;

        let reply = serde_json::from_str::<BotApiReply>(&response.body).ok();
        let accepted = response.status == 200 && reply.as_ref().is_some_and(|r| r.ok);
        if !accepted {
            let description = reply
                .and_then(|r| r.description)
                .unwrap_or_else(|| response.body.clone());
            return Err(BotError::FatalNotify(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            )));
        }

        tracing::debug!("Telegram message sent to chat {}", self.chat_id);
        Ok(())
    }
}
