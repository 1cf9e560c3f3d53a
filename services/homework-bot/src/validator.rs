//! Shape checks on decoded API answers

use serde_json::Value;

use crate::BotError;

/// Pull the list of homework records out of a decoded answer.
///
/// `current_date` is only probed for presence. A missing `current_date` or
/// `homeworks` key is reported as [`BotError::MissingKey`].
pub fn extract(response: &Value) -> crate::Result<&[Value]> {
    let answer = response
        .as_object()
        .ok_or_else(|| BotError::Shape("not a mapping".to_string()))?;

    if !answer.contains_key("current_date") {
        return Err(BotError::MissingKey("current_date"));
    }

    let homeworks = answer
        .get("homeworks")
        .ok_or(BotError::MissingKey("homeworks"))?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| BotError::Shape("homeworks not a list".to_string()))
}
