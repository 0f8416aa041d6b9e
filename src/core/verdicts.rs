use std::collections::HashMap;

use super::error::WatchError;
use super::validator::{StatusItem, NAME_KEY, STATUS_KEY};

/// Status code -> verdict text. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct KnownVerdicts {
    verdicts: HashMap<String, String>,
}

impl Default for KnownVerdicts {
    fn default() -> Self {
        let verdicts = [
            ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ]
        .into_iter()
        .map(|(code, text)| (code.to_string(), text.to_string()))
        .collect();

        Self { verdicts }
    }
}

impl KnownVerdicts {
    pub fn get(&self, status: &str) -> Option<&str> {
        self.verdicts.get(status).map(String::as_str)
    }

    /// Turns one item into the notification text.
    pub fn translate(&self, item: &StatusItem) -> Result<String, WatchError> {
        let name = item
            .name
            .as_deref()
            .ok_or_else(|| WatchError::MissingField(NAME_KEY.into()))?;
        let status = item
            .status
            .as_deref()
            .ok_or_else(|| WatchError::MissingField(STATUS_KEY.into()))?;

        let verdict = self
            .get(status)
            .ok_or_else(|| WatchError::UnknownStatus(status.to_string()))?;

        Ok(format!(
            "Изменился статус проверки работы \"{}\". {}",
            name, verdict
        ))
    }
}
