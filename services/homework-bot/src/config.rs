//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::BotError;

pub const HOMEWORK_TOKEN_ENV: &str = "HOMEWORK_TOKEN";
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Names used by older `.env` files, consulted when the primary name is unset
pub const LEGACY_TELEGRAM_TOKEN_ENV: &str = "TELEGRAMM_TOKEN";
pub const LEGACY_TELEGRAM_CHAT_ID_ENV: &str = "CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Homework review API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
            token: None,
            chat_id: None,
        }
    }
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Secrets checked at startup; immutable for the life of the process
#[derive(Clone)]
pub struct Credentials {
    pub api_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_interval() -> Duration {
    Duration::from_secs(600)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Fill unset secrets from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|key| std::env::var(key).ok());
    }

    /// Fill unset secrets using the given lookup. Values already present in
    /// the config file win over the lookup.
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots: [(&mut Option<String>, &[&str]); 3] = [
            (&mut self.api.token, &[HOMEWORK_TOKEN_ENV]),
            (
                &mut self.telegram.token,
                &[TELEGRAM_TOKEN_ENV, LEGACY_TELEGRAM_TOKEN_ENV],
            ),
            (
                &mut self.telegram.chat_id,
                &[TELEGRAM_CHAT_ID_ENV, LEGACY_TELEGRAM_CHAT_ID_ENV],
            ),
        ];
        for (slot, keys) in slots {
            if present(slot).is_some() {
                continue;
            }
            let found = keys.iter().find_map(|key| {
                lookup(key)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (*key, value))
            });
            if let Some((key, value)) = found {
                tracing::debug!("Resolved {} from environment", key);
                *slot = Some(value);
            }
        }
    }

    /// Check that every required secret is present.
    ///
    /// Chat credentials are checked first: without them there is no way to
    /// alert anyone, so their absence is logged at error level.
    pub fn credentials(&self) -> crate::Result<Credentials> {
        let telegram_token = present(&self.telegram.token);
        let chat_id = present(&self.telegram.chat_id);
        let (Some(telegram_token), Some(chat_id)) = (telegram_token, chat_id) else {
            tracing::error!(
                "Telegram credentials are missing (set {} and {})",
                TELEGRAM_TOKEN_ENV,
                TELEGRAM_CHAT_ID_ENV
            );
            return Err(BotError::Startup(
                "Telegram token or chat id is not configured".to_string(),
            ));
        };

        let api_token = present(&self.api.token).ok_or_else(|| {
            BotError::Startup(format!(
                "homework API token is not configured (set {})",
                HOMEWORK_TOKEN_ENV
            ))
        })?;

        Ok(Credentials {
            api_token: api_token.to_string(),
            telegram_token: telegram_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
