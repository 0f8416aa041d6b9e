use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::Notifier;
use crate::core::error::WatchError;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramClient {
    token: String,
    chat_id: i64,
    api_base: String,
    client: Client,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: i64, timeout: Option<Duration>) -> Result<Self, WatchError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| WatchError::Unexpected(format!("Telegram client init failed: {}", e)))?;

        Ok(Self {
            token,
            chat_id,
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        })
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    fn send_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    pub async fn send_message(&self, text: &str) -> Result<(), WatchError> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let res = self
            .client
            .post(self.send_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| WatchError::DeliveryFailed(e.without_url().to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(WatchError::DeliveryFailed(format!(
                "Telegram API Error: {} - {}",
                status, err_text
            )));
        }

        let body: SendMessageResponse = res
            .json()
            .await
            .map_err(|e| WatchError::DeliveryFailed(e.without_url().to_string()))?;
        if !body.ok {
            return Err(WatchError::DeliveryFailed(format!(
                "Telegram API returned ok: false ({})",
                body.description.unwrap_or_default()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn deliver(&self, text: &str) -> Result<(), WatchError> {
        // failures are logged by the caller
        self.send_message(text).await?;
        debug!(chat_id = self.chat_id, "Бот отправил сообщение \"{}\"", text);
        Ok(())
    }
}
