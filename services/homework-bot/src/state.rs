//! Poll loop state

use std::time::Duration;

/// State owned by the poll loop. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` for the next fetch, unix seconds
    pub last_poll_timestamp: i64,
    /// Last error notification sent to the chat, empty if none yet
    pub last_error_message: String,
}

impl PollState {
    /// Fresh state whose first poll looks one interval into the past
    pub fn new(now: i64, interval: Duration) -> Self {
        let lookback = i64::try_from(interval.as_secs()).unwrap_or(i64::MAX);
        Self {
            last_poll_timestamp: now.saturating_sub(lookback),
            last_error_message: String::new(),
        }
    }
}
