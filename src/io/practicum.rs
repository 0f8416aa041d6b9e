//! HTTP client for the homework status API.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::Fetcher;
use crate::core::error::WatchError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: String, timeout: Option<Duration>) -> Result<Self, WatchError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| WatchError::Unexpected(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token,
        })
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl Fetcher for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError> {
        debug!(endpoint = %self.endpoint, from_date, "Начало запроса к API");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, self.auth_header())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| WatchError::FetchFailed(format!("Ошибка при запросе к API: {}", e)))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(WatchError::FetchFailed(format!(
                "Эндпоинт {} недоступен. Код ответа API: {}",
                self.endpoint,
                status.as_u16()
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| WatchError::FetchFailed(format!("Ошибка при запросе к API: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::testing::{ok_json, serve_once};

    #[test]
    fn oauth_header() {
        let client = PracticumClient::new(DEFAULT_ENDPOINT, "secret".into(), None).unwrap();
        assert_eq!(client.auth_header(), "OAuth secret");
    }

    #[tokio::test]
    async fn decodes_json_answer() {
        let base = serve_once(ok_json(r#"{"homeworks": [], "current_date": 100}"#)).await;
        let endpoint = format!("{}/api/", base);
        let client = PracticumClient::new(&endpoint, "t".into(), Some(Duration::from_secs(5))).unwrap();
        let value = client.fetch(42).await.unwrap();
        assert_eq!(value["current_date"], 100);
    }

    #[tokio::test]
    async fn non_200_names_endpoint_and_code() {
        let base = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let endpoint = format!("{}/api/", base);
        let client = PracticumClient::new(&endpoint, "t".into(), Some(Duration::from_secs(5))).unwrap();
        let err = client.fetch(0).await.unwrap_err();
        assert_eq!(
            err,
            WatchError::FetchFailed(format!(
                "Эндпоинт {} недоступен. Код ответа API: 503",
                endpoint
            ))
        );
    }

    #[tokio::test]
    async fn connection_refused_is_fetch_failure() {
        let client = PracticumClient::new(
            "http://127.0.0.1:1/api/",
            "t".into(),
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        let err = client.fetch(0).await.unwrap_err();
        match err {
            WatchError::FetchFailed(detail) => assert!(detail.starts_with("Ошибка при запросе к API")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
