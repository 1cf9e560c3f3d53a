//! Chat delivery with suppression of repeated error alerts

use std::sync::Arc;

use async_trait::async_trait;

/// A chat channel that can deliver plain text
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ChatTransport: Send + Sync {
    /// Send one message. Errors are [`crate::BotError::FatalNotify`].
    async fn send(&self, text: &str) -> crate::Result<()>;
}

/// Delivers status and error messages to the chat
#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn ChatTransport>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Send unconditionally
    pub async fn deliver(&self, message: &str) -> crate::Result<()> {
        self.transport.send(message).await?;
        tracing::info!("Message delivered to chat");
        Ok(())
    }

    /// Send an error alert unless it matches `last_error`, the previous alert.
    /// Returns whether a message went out.
    pub async fn deliver_if_error_changed(
        &self,
        message: &str,
        last_error: &mut String,
    ) -> crate::Result<bool> {
        if message == last_error.as_str() {
            tracing::debug!("Error alert unchanged, not resending");
            return Ok(false);
        }
        self.deliver(message).await?;
        *last_error = message.to_string();
        Ok(true)
    }
}
