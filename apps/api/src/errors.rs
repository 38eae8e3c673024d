use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Could not extract text from resume")]
    EmptyDocument,

    #[error("AI service not available")]
    AiUnavailable,

    #[error("AI error: {0}")]
    Ai(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extract(e) => {
                let code = match e {
                    ExtractError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
                    ExtractError::Malformed { .. } => "DECODE_FAILURE",
                    ExtractError::NoTextLayer { .. } => "NO_TEXT_LAYER",
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::EmptyDocument => (
                StatusCode::BAD_REQUEST,
                "EMPTY_DOCUMENT",
                "Could not extract text from resume. The file might be corrupted or contain only images.".to_string(),
            ),
            AppError::AiUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI_UNAVAILABLE",
                "AI service not available".to_string(),
            ),
            AppError::Ai(msg) => {
                tracing::error!("AI error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FileKind;

    #[test]
    fn test_unsupported_format_maps_to_bad_request() {
        let response =
            AppError::Extract(ExtractError::UnsupportedFormat("txt".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_decode_failure_maps_to_bad_request() {
        let response = AppError::Extract(ExtractError::Malformed {
            kind: FileKind::Pdf,
            reason: "broken xref".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_ai_unavailable_maps_to_503() {
        let response = AppError::AiUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
