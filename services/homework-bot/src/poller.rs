//! Poller: fetches, validates, interprets and notifies on a fixed interval

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::HomeworkApi;
use crate::notifier::Notifier;
use crate::state::PollState;
use crate::{status, validator, BotError};

/// What a single poll iteration did
#[derive(Debug)]
pub enum PollOutcome {
    /// A status change was sent to the chat
    Delivered(String),
    /// The answer held no homework records
    NoUpdates,
    /// A recoverable failure; `alerted` is false when the alert was a repeat
    Failed { error: BotError, alerted: bool },
}

/// Prefix of every error alert sent to the chat
pub const ERROR_ALERT_PREFIX: &str = "Сбой в работе программы";

pub fn error_alert(error: &BotError) -> String {
    format!("{}: {}", ERROR_ALERT_PREFIX, error)
}

/// Owns the poll state and drives one watcher loop
pub struct Poller {
    api: Arc<dyn HomeworkApi>,
    notifier: Notifier,
    interval: Duration,
    state: PollState,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("interval", &self.interval)
            .field("state", &self.state)
            .finish()
    }
}

impl Poller {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Notifier,
        interval: Duration,
        now: i64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            interval,
            state: PollState::new(now, interval),
            cancel,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run one iteration at time `now`.
    ///
    /// Recoverable failures become [`PollOutcome::Failed`]; only failures to
    /// deliver to the chat are returned as `Err`. `last_poll_timestamp`
    /// advances only when the iteration succeeds.
    pub async fn poll_once(&mut self, now: i64) -> crate::Result<PollOutcome> {
        match self.check(self.state.last_poll_timestamp).await {
            Ok(Some(message)) => {
                self.notifier.deliver(&message).await?;
                self.state.last_poll_timestamp = now;
                Ok(PollOutcome::Delivered(message))
            }
            Ok(None) => {
                tracing::info!("No new homework statuses");
                self.state.last_poll_timestamp = now;
                Ok(PollOutcome::NoUpdates)
            }
            Err(error) if error.is_recoverable() => {
                let alert = error_alert(&error);
                tracing::error!("{}", alert);
                let alerted = self
                    .notifier
                    .deliver_if_error_changed(&alert, &mut self.state.last_error_message)
                    .await?;
                Ok(PollOutcome::Failed { error, alerted })
            }
            Err(error) => Err(error),
        }
    }

    /// Fetch, validate and interpret the most recent record, if any
    async fn check(&self, from_date: i64) -> crate::Result<Option<String>> {
        let response = self.api.fetch(from_date).await?;
        let homeworks = validator::extract(&response)?;
        homeworks.first().map(status::interpret).transpose()
    }

    /// Poll until cancelled. Returns early only on a fatal error.
    pub async fn run(mut self) -> crate::Result<()> {
        tracing::info!("Polling every {:?}", self.interval);
        loop {
            self.poll_once(chrono::Utc::now().timestamp()).await?;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    return Ok(());
                }
            }
        }
    }
}
