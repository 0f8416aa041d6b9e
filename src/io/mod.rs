pub mod practicum;
pub mod telegram;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::WatchError;

/// Source of homework statuses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the decoded API answer for everything changed since `from_date`.
    /// Transport failures and non-success codes both come back as `FetchFailed`.
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError>;
}

/// Sink for human-readable notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), WatchError>;
}
