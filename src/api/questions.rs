use axum::extract::{Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::validation;
use crate::core::state::AppState;
use crate::schemas::question::QuestionResponse;

#[derive(Debug, Deserialize)]
pub(crate) struct RandomQuestionQuery {
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    topic: Option<String>,
}

pub(crate) async fn random_question(
    State(state): State<AppState>,
    Query(query): Query<RandomQuestionQuery>,
) -> Result<Response, ApiError> {
    let filter =
        validation::question_filter(query.difficulty.as_deref(), query.topic.as_deref())?;

    let question = state
        .questions()
        .random_question(filter)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load question"))?
        .ok_or(ApiError::NotFound("No question matches the given filters"))?;
    tracing::debug!(question_id = question.id, "Serving random question");

    let mut response = Json(QuestionResponse::from(question)).into_response();
    response.headers_mut().insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}
