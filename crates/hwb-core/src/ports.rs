use async_trait::async_trait;
use serde_json::Value;

use crate::{
    domain::{ChatId, Timestamp},
    Result,
};

/// Hexagonal port for the homework-review API.
///
/// Implementations return the decoded body untouched; interpretation is done by
/// `homework::check_response`.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    async fn get_api_answer(&self, since: Timestamp) -> Result<Value>;
}

/// Outbound-only messaging port (Telegram today).
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}
