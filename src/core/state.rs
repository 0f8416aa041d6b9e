use tracing::warn;

/// Prefix of every error report sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Returns true iff `candidate` differs from the last text sent.
pub fn should_notify(candidate: &str, last_sent: &str) -> bool {
    candidate != last_sent
}

/// The `from_date` sent to the API. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(ts: i64) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Moves to the server-supplied value unless that would go backwards.
    pub fn advance(&mut self, server_ts: i64) {
        if server_ts < self.0 {
            warn!(current = self.0, server = server_ts, "server cursor is behind, keeping current");
            return;
        }
        self.0 = server_ts;
    }
}

/// Dedup memory of the loop. Empty strings mean "nothing sent yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    pub last_sent_text: String,
    pub last_error_text: String,
}

impl LoopState {
    pub fn should_send(&self, text: &str) -> bool {
        should_notify(text, &self.last_sent_text)
    }

    pub fn should_report(&self, text: &str) -> bool {
        should_notify(text, &self.last_error_text)
    }

    pub fn record_sent(&mut self, text: String) {
        self.last_sent_text = text;
    }

    pub fn record_error(&mut self, text: String) {
        self.last_error_text = text;
    }

    pub fn clear_error(&mut self) {
        self.last_error_text.clear();
    }
}

pub fn failure_message(description: &str) -> String {
    format!("{}: {}", FAILURE_PREFIX, description)
}
