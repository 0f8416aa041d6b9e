use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::error;

use super::error::ConfigError;
use crate::io::practicum::DEFAULT_ENDPOINT;

pub const CONFIG_ENV: &str = "HOMEWORK_WATCH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "homework-watch.toml";
pub const RETRY_PERIOD_SECS: u64 = 600;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Tunables. Read from TOML, every field has a default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    pub endpoint: String,
    pub retry_period_secs: u64,
    pub fetch_timeout_secs: Option<u64>,
    pub deliver_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_period_secs: RETRY_PERIOD_SECS,
            fetch_timeout_secs: None,
            deliver_timeout_secs: None,
            log_level: "debug".to_string(),
        }
    }
}

impl WatchConfig {
    /// Path from `HOMEWORK_WATCH_CONFIG`, else `homework-watch.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Missing file means defaults; a file that fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content).map_err(|source| ConfigError::InvalidFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    pub fn deliver_timeout(&self) -> Option<Duration> {
        self.deliver_timeout_secs.map(Duration::from_secs)
    }

    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

/// Secrets. Only ever taken from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: i64,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Every missing variable is logged before failing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let practicum = read(PRACTICUM_TOKEN);
        let telegram = read(TELEGRAM_TOKEN);
        let chat = read(TELEGRAM_CHAT_ID);

        let missing: Vec<&'static str> = [
            (PRACTICUM_TOKEN, practicum.is_none()),
            (TELEGRAM_TOKEN, telegram.is_none()),
            (TELEGRAM_CHAT_ID, chat.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name)
        .collect();

        for name in &missing {
            error!("Отсутствует обязательная переменная окружения: '{}'", name);
        }

        match (practicum, telegram, chat) {
            (Some(practicum_token), Some(telegram_token), Some(chat)) => {
                let telegram_chat_id = chat
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidChatId(chat.clone()))?;
                Ok(Self {
                    practicum_token,
                    telegram_token,
                    telegram_chat_id,
                })
            }
            _ => Err(ConfigError::MissingVariables(missing)),
        }
    }
}
