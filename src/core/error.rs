use thiserror::Error;

/// Everything that can go wrong inside one poll cycle.
///
/// The `Display` text is what ends up in the chat, so it stays in the
/// language of the notifications.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    #[error("{0}")]
    FetchFailed(String),

    #[error("Некорректный ответ API: {0}")]
    MalformedResponse(String),

    #[error("Отсутствует ключ \"{0}\" в ответе API")]
    MissingField(String),

    #[error("Отсутствует или некорректен ключ \"current_date\" в ответе API")]
    MissingCursor,

    #[error("Неожиданный статус домашней работы: {0}")]
    UnknownStatus(String),

    #[error("Сбой при отправке сообщения в Telegram: {0}")]
    DeliveryFailed(String),

    #[error("{0}")]
    Unexpected(String),
}

/// Startup failures. These never reach the loop.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    #[error("TELEGRAM_CHAT_ID is not an integer: {0}")]
    InvalidChatId(String),

    #[error("cannot read config file {path}: {source}")]
    Unreadable {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    InvalidFile {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}
