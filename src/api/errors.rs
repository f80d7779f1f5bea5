use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    BadRequest(String),
    NotFound(&'static str),
    BadGateway(&'static str),
    Internal(&'static str),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &'static str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context)
    }

    /// Same as [`ApiError::internal`] for failures of an upstream service.
    pub(crate) fn bad_gateway(err: impl std::fmt::Display, context: &'static str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::BadGateway(context)
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::BadRequest(message) => message,
            ApiError::NotFound(message)
            | ApiError::BadGateway(message)
            | ApiError::Internal(message) => message.to_string(),
        };

        (status, Json(ErrorResponse { status: status.as_u16(), detail })).into_response()
    }
}
