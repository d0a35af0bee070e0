use std::{env, time::Duration};

use tracing::warn;

use crate::{
    credentials::{self, Credentials},
    domain::ChatId,
    errors::Error,
    Result,
};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed configuration, built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct Config {
    // Secrets
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: ChatId,

    // Remote API
    pub practicum_endpoint: String,
    pub http_timeout: Duration,

    // Loop
    pub retry_period: Duration,
}

impl Config {
    /// Load `.env` (without overriding the real environment), then read the process env.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Failed to load .env: {e}");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let creds = Credentials::from_lookup(&lookup);
        if !credentials::check_tokens(&creds) {
            return Err(Error::Credentials(credentials::missing_tokens(&creds)));
        }

        // check_tokens guarantees all three are present and non-blank.
        let practicum_token = creds.practicum_token.unwrap_or_default();
        let telegram_token = creds.telegram_token.unwrap_or_default();
        let raw_chat_id = creds.telegram_chat_id.unwrap_or_default();
        let telegram_chat_id = raw_chat_id
            .parse::<ChatId>()
            .map_err(|e| Error::Config(format!("{}: {e}", credentials::TELEGRAM_CHAT_ID)))?;

        let practicum_endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_period = env_secs(&lookup, "RETRY_PERIOD")?.unwrap_or(DEFAULT_RETRY_PERIOD);
        let http_timeout = env_secs(&lookup, "HTTP_TIMEOUT")?.unwrap_or(DEFAULT_HTTP_TIMEOUT);

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            practicum_endpoint,
            http_timeout,
            retry_period,
        })
    }
}

fn env_secs(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|s| Some(Duration::from_secs(s)))
        .map_err(|_| Error::Config(format!("{key} must be a number of seconds, got {raw:?}")))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
