//! The poll loop: fetch, validate, translate, notify, sleep, repeat.
//!
//! Every error raised inside a tick is handled in [`Poller::run`]; nothing
//! short of cancellation ends the loop.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    config::Config,
    domain::{unix_now, Timestamp},
    errors::Error,
    homework::{check_response, current_date, parse_status},
    notifier::Notifier,
    ports::HomeworkApi,
    Result,
};

pub const STARTUP_MESSAGE: &str = "Привет, я начал работу";

/// Mutable loop state. Only the poller reads or writes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound sent as `from_date` on the next request.
    pub since: Timestamp,
    /// Last failure text delivered to the chat, to avoid repeating it every tick.
    pub last_error: Option<String>,
}

impl PollState {
    pub fn new(since: Timestamp) -> Self {
        Self {
            since,
            last_error: None,
        }
    }
}

pub struct Poller {
    api: Arc<dyn HomeworkApi>,
    notifier: Notifier,
    retry_period: Duration,
    state: PollState,
}

impl Poller {
    pub fn new(cfg: &Config, api: Arc<dyn HomeworkApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            retry_period: cfg.retry_period,
            state: PollState::new(unix_now()),
        }
    }

    /// Override the initial `from_date` (defaults to the startup clock).
    pub fn starting_from(mut self, since: Timestamp) -> Self {
        self.state.since = since;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Send the startup notice, then poll until `cancel` fires.
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!(
            since = self.state.since,
            retry_period_secs = self.retry_period.as_secs(),
            "Homework poller started"
        );
        self.notifier.send_message(STARTUP_MESSAGE).await;

        loop {
            match self.tick().await {
                Ok(_) => self.state.last_error = None,
                Err(e) => self.report_failure(&e).await,
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = sleep(self.retry_period) => {}
            }
        }

        info!("Homework poller stopped");
    }

    /// One polling step. Returns the notification text, if one was sent.
    ///
    /// `since` advances as soon as the API answers, even if the payload turns
    /// out to be unusable, so a single malformed record cannot wedge the loop.
    pub async fn tick(&mut self) -> Result<Option<String>> {
        let payload = self.api.get_api_answer(self.state.since).await?;
        self.state.since = current_date(&payload).unwrap_or_else(unix_now);

        let homeworks = check_response(&payload)?;
        let Some(latest) = homeworks.first() else {
            debug!(since = self.state.since, "No status changes");
            return Ok(None);
        };

        let message = parse_status(latest)?;
        self.notifier.send_message(&message).await;
        Ok(Some(message))
    }

    async fn report_failure(&mut self, e: &Error) {
        let message = format!("Сбой в работе программы: {e}");
        error!(since = self.state.since, "{message}");

        if self.state.last_error.as_deref() == Some(message.as_str()) {
            return;
        }
        if self.notifier.send_message(&message).await {
            self.state.last_error = Some(message);
        }
    }
}
