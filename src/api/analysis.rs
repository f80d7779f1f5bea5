use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::analysis::AnalysisResult;

/// The payload is forwarded as-is; its expected keys are `correct_answer`,
/// `user_steps` and `user_answer`, but nothing is enforced here.
pub(crate) async fn analyze_submission(
    State(state): State<AppState>,
    Json(submission): Json<Value>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state
        .analyzer()
        .analyze(&submission)
        .await
        .map_err(|e| ApiError::bad_gateway(e, "Failed to analyze submission"))?;

    Ok(Json(result))
}
