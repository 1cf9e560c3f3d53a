//! Client for the homework review API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::Credentials;
use crate::io::HttpClient;
use crate::BotError;

/// Source of homework status answers
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (unix seconds)
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Authenticated client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    auth_header: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self {
            endpoint: endpoint.to_string(),
            auth_header: format!("OAuth {}", token),
            http,
        }
    }

    pub fn from_credentials(
        endpoint: &str,
        credentials: &Credentials,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self::new(endpoint, &credentials.api_token, http)
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.auth_header.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            return Err(BotError::HttpStatus(response.status));
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| BotError::Shape(format!("response body is not valid JSON: {}", e)))?;

        if let Some(envelope) = body.as_object() {
            if envelope.contains_key("error") || envelope.contains_key("code") {
                return Err(BotError::ApiEnvelope(describe_envelope(envelope)));
            }
        }

        tracing::info!("Fetched homework statuses from {}", self.endpoint);
        Ok(body)
    }
}

/// Summarise the API's own error envelope, e.g. `not_authenticated: <message>`
fn describe_envelope(envelope: &Map<String, Value>) -> String {
    ["code", "error", "message"]
        .iter()
        .filter_map(|key| envelope.get(*key))
        .filter(|value| !value.is_null())
        .map(value_text)
        .collect::<Vec<_>>()
        .join(": ")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(inner) => match inner.get("error") {
            Some(Value::String(text)) => text.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}
