//! The poll-check-notify loop.
//!
//! One cycle is fetch -> validate -> translate -> deliver. A cycle either
//! fully succeeds, advancing the cursor, or fails at its first error, which is
//! reported to the chat unless the same report was the last one sent. Both
//! outcomes are followed by the same fixed sleep.

use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::error::WatchError;
use super::state::{failure_message, LoopState, PollCursor};
use super::validator::validate;
use super::verdicts::KnownVerdicts;
use crate::io::{Fetcher, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Number of messages delivered in the cycle.
    Succeeded { delivered: usize },
    Failed(WatchError),
}

pub struct PollLoop<F, N> {
    fetcher: F,
    notifier: N,
    verdicts: KnownVerdicts,
    retry_period: Duration,
    cursor: PollCursor,
    state: LoopState,
}

impl<F: Fetcher, N: Notifier> PollLoop<F, N> {
    pub fn new(fetcher: F, notifier: N, verdicts: KnownVerdicts, retry_period: Duration) -> Self {
        Self {
            fetcher,
            notifier,
            verdicts,
            retry_period,
            cursor: PollCursor::now(),
            state: LoopState::default(),
        }
    }

    pub fn with_cursor(mut self, cursor: PollCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Runs until the process is killed.
    pub async fn run(mut self) {
        info!(period_secs = self.retry_period.as_secs(), "Бот запущен");
        loop {
            self.run_once().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One full cycle including error reporting, without the sleep.
    pub async fn run_once(&mut self) -> CycleOutcome {
        match self.cycle().await {
            Ok(delivered) => {
                self.state.clear_error();
                CycleOutcome::Succeeded { delivered }
            }
            Err(err) => {
                self.report_failure(&err).await;
                CycleOutcome::Failed(err)
            }
        }
    }

    async fn cycle(&mut self) -> Result<usize, WatchError> {
        let raw = self.fetcher.fetch(self.cursor.value()).await?;
        let response = validate(&raw)?;

        if response.items.is_empty() {
            debug!("Отсутствие в ответе новых статусов");
        }

        let mut delivered = 0;
        for item in &response.items {
            let text = self.verdicts.translate(item)?;
            if !self.state.should_send(&text) {
                debug!(text = %text, "status unchanged, skipping");
                continue;
            }
            self.notifier.deliver(&text).await?;
            self.state.record_sent(text);
            delivered += 1;
        }

        self.cursor.advance(response.cursor);
        Ok(delivered)
    }

    async fn report_failure(&mut self, err: &WatchError) {
        let message = failure_message(&err.to_string());
        error!("{}", message);

        if !self.state.should_report(&message) {
            return;
        }
        if let Err(e) = self.notifier.deliver(&message).await {
            warn!(error = %e, "error report was not delivered");
        }
        self.state.record_error(message);
    }
}
