use std::sync::Arc;

use tracing::{debug, error};

use crate::{domain::ChatId, ports::MessagingPort};

/// Sends plain text to the one configured chat.
///
/// Delivery failures are logged and swallowed: a broken notification channel
/// must never stop the poll loop.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    /// Returns whether the message was delivered.
    pub async fn send_message(&self, text: &str) -> bool {
        match self.messenger.send_text(&self.chat_id, text).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, "Message sent: {text}");
                true
            }
            Err(e) => {
                error!(chat_id = %self.chat_id, "Failed to send message: {e}");
                false
            }
        }
    }
}
