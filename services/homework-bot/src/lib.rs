//! Homework bot - review status watcher
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and reports them (and any failures) to a Telegram chat.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod notifier;
pub mod poller;
pub mod state;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config, Credentials};
pub use error::{BotError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::{HomeworkApi, PracticumClient};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::poller::Poller;
use crate::telegram::TelegramTransport;

/// Run the watcher until ctrl-c or a fatal delivery failure
pub async fn run(config: Config, credentials: Credentials) -> Result<()> {
    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.polling.request_timeout)?);
    let cancel = CancellationToken::new();

    let api: Arc<dyn HomeworkApi> = Arc::new(PracticumClient::from_credentials(
        &config.api.endpoint,
        &credentials,
        Arc::clone(&http),
    ));
    let transport = TelegramTransport::new(&config.telegram.api_url, &credentials, http);
    let notifier = Notifier::new(Arc::new(transport));

    let poller = Poller::new(
        api,
        notifier,
        config.polling.interval,
        chrono::Utc::now().timestamp(),
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Homework bot started");
    poller.run().await?;
    tracing::info!("Homework bot stopped");

    Ok(())
}

/// Fetch once with the API token and return the raw answer
pub async fn probe(config: &Config, from_date: i64) -> Result<serde_json::Value> {
    let token = config
        .api
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            BotError::Startup(format!(
                "homework API token is not configured (set {})",
                config::HOMEWORK_TOKEN_ENV
            ))
        })?;
    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.polling.request_timeout)?);
    PracticumClient::new(&config.api.endpoint, token, http)
        .fetch(from_date)
        .await
}
