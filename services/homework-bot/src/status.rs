//! Turning homework records into status-change messages

use serde_json::{Map, Value};

use crate::catalog::HomeworkStatus;
use crate::BotError;

/// A homework record with both fields present and a known status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// Read one wire record (`homework_name`, `status`).
    ///
    /// An absent or null field is missing. A non-string name is rendered as
    /// JSON; a non-string status is unknown.
    pub fn from_value(record: &Value) -> crate::Result<Self> {
        let fields = record
            .as_object()
            .ok_or_else(|| BotError::Shape("homework record is not a mapping".to_string()))?;

        let name = match field(fields, "homework_name")? {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let status = match field(fields, "status")? {
            Value::String(code) => HomeworkStatus::from_code(code)
                .ok_or_else(|| BotError::UnknownStatus(code.clone()))?,
            other => return Err(BotError::UnknownStatus(other.to_string())),
        };

        Ok(Self { name, status })
    }

    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

fn field<'a>(fields: &'a Map<String, Value>, key: &'static str) -> crate::Result<&'a Value> {
    fields
        .get(key)
        .filter(|value| !value.is_null())
        .ok_or(BotError::MissingField(key))
}

/// Build the notification text for one wire record
pub fn interpret(record: &Value) -> crate::Result<String> {
    HomeworkRecord::from_value(record).map(|record| record.message())
}
