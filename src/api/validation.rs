use crate::api::errors::ApiError;
use crate::db::types::{Difficulty, Topic};
use crate::repositories::questions::QuestionFilter;

const ALL: &str = "all";

/// Maps the raw query values onto the fixed allow-lists. Nothing that fails
/// here ever reaches a query.
pub(crate) fn question_filter(
    difficulty: Option<&str>,
    topic: Option<&str>,
) -> Result<QuestionFilter, ApiError> {
    Ok(QuestionFilter { topic: parse_topic(topic)?, difficulty: parse_difficulty(difficulty)? })
}

pub(crate) fn parse_difficulty(value: Option<&str>) -> Result<Option<Difficulty>, ApiError> {
    match value {
        Some(ALL) => Ok(None),
        Some(raw) => Difficulty::from_digit(raw).map(Some).ok_or_else(invalid_difficulty),
        None => Err(invalid_difficulty()),
    }
}

pub(crate) fn parse_topic(value: Option<&str>) -> Result<Option<Topic>, ApiError> {
    match value {
        Some(ALL) => Ok(None),
        Some(raw) => Topic::from_key(raw).map(Some).ok_or_else(invalid_topic),
        None => Err(invalid_topic()),
    }
}

fn invalid_difficulty() -> ApiError {
    ApiError::BadRequest("difficulty must be one of: all, 1, 2, 3, 4, 5".to_string())
}

fn invalid_topic() -> ApiError {
    let keys = Topic::ALL.iter().map(|topic| topic.key()).collect::<Vec<_>>().join(", ");
    ApiError::BadRequest(format!("topic must be one of: all, {keys}"))
}
