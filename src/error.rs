//! Errors surfaced by the HTTP layer. The analyzer itself never fails.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request must include `text` or `url`")]
    MissingInput,
    #[error("could not find a video id in `{0}`")]
    InvalidUrl(String),
    #[error("content exceeds {limit} characters")]
    TooLarge { limit: usize },
    #[error("transcript unavailable: {0}")]
    TranscriptUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput | Self::InvalidUrl(_) => "invalid_input",
            Self::TooLarge { .. } => "content_too_large",
            Self::TranscriptUnavailable(_) => "transcript_unavailable",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput | Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TranscriptUnavailable(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(error_code = self.code(), %status, error_message = %self, "request rejected");
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
