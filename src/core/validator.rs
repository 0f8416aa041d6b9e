use serde_json::{Map, Value};

use super::error::WatchError;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURSOR_KEY: &str = "current_date";
pub const NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// One entry of the `homeworks` array.
///
/// Fields stay optional here: their absence is reported by the translator,
/// not by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusItem {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl StatusItem {
    pub fn new(name: &str, status: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            status: Some(status.to_string()),
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Result<Self, WatchError> {
        Ok(Self {
            name: text_field(obj, NAME_KEY)?,
            status: text_field(obj, STATUS_KEY)?,
        })
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, WatchError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(WatchError::MalformedResponse(format!(
            "значение \"{}\" не является строкой: {}",
            key, other
        ))),
    }
}

/// A payload whose shape has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    pub items: Vec<StatusItem>,
    pub cursor: i64,
}

/// Checks the decoded API answer before any field is trusted.
pub fn validate(raw: &Value) -> Result<ValidatedResponse, WatchError> {
    let obj = raw.as_object().ok_or_else(|| {
        WatchError::MalformedResponse("ответ API не является словарём".into())
    })?;

    let homeworks = obj
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| WatchError::MissingField(HOMEWORKS_KEY.into()))?;

    let cursor = obj
        .get(CURSOR_KEY)
        .and_then(Value::as_i64)
        .ok_or(WatchError::MissingCursor)?;

    let list = homeworks.as_array().ok_or_else(|| {
        WatchError::MalformedResponse("данные под ключом \"homeworks\" не являются списком".into())
    })?;

    let items = list
        .iter()
        .map(|entry| match entry.as_object() {
            Some(obj) => StatusItem::from_object(obj),
            None => Err(WatchError::MalformedResponse(
                "элемент списка \"homeworks\" не является словарём".into(),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedResponse { items, cursor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_server_order() {
        let raw = json!({
            "homeworks": [
                {"homework_name": "b", "status": "approved"},
                {"homework_name": "a", "status": "reviewing"}
            ],
            "current_date": 1700000000
        });
        let res = validate(&raw).unwrap();
        assert_eq!(res.cursor, 1700000000);
        assert_eq!(
            res.items,
            vec![StatusItem::new("b", "approved"), StatusItem::new("a", "reviewing")]
        );
    }

    #[test]
    fn empty_list_is_valid() {
        let res = validate(&json!({"homeworks": [], "current_date": 100})).unwrap();
        assert!(res.items.is_empty());
        assert_eq!(res.cursor, 100);
    }

    #[test]
    fn rejects_non_object() {
        let err = validate(&json!(["homeworks"])).unwrap_err();
        assert!(matches!(err, WatchError::MalformedResponse(_)));
    }

    #[test]
    fn missing_homeworks() {
        let err = validate(&json!({"current_date": 100})).unwrap_err();
        assert_eq!(err, WatchError::MissingField("homeworks".into()));
    }

    #[test]
    fn homeworks_not_a_list() {
        let err = validate(&json!({"homeworks": {"a": 1}, "current_date": 100})).unwrap_err();
        assert!(matches!(err, WatchError::MalformedResponse(_)));
    }

    #[test]
    fn cursor_must_be_integer() {
        let err = validate(&json!({"homeworks": [], "current_date": "abc"})).unwrap_err();
        assert_eq!(err, WatchError::MissingCursor);

        let err = validate(&json!({"homeworks": [], "current_date": 1.5})).unwrap_err();
        assert_eq!(err, WatchError::MissingCursor);

        let err = validate(&json!({"homeworks": []})).unwrap_err();
        assert_eq!(err, WatchError::MissingCursor);
    }

    #[test]
    fn absent_item_fields_are_left_to_translator() {
        let res = validate(&json!({"homeworks": [{"status": "approved"}], "current_date": 1}))
            .unwrap();
        assert_eq!(res.items[0].name, None);
        assert_eq!(res.items[0].status.as_deref(), Some("approved"));
    }

    #[test]
    fn non_object_item_is_malformed() {
        let err = validate(&json!({"homeworks": [42], "current_date": 1})).unwrap_err();
        assert!(matches!(err, WatchError::MalformedResponse(_)));
    }
}
