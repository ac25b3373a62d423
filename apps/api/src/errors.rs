#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::extract::ExtractionError;
use crate::llm_client::ChatError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required credential or setting absent. Normally fatal at startup;
    /// kept in the taxonomy so misconfiguration found later still surfaces
    /// as a server error.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider call failed or returned an error payload. Carries the
    /// provider's status code so it can be propagated to the caller.
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Api { status, message } => AppError::Upstream { status, message },
            ChatError::Http(e) => AppError::Upstream {
                status: 502,
                message: e.to_string(),
            },
            ChatError::Parse(e) => AppError::Upstream {
                status: 502,
                message: format!("unreadable provider response: {e}"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    "The server is missing required configuration".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upstream {
                status: upstream_status,
                message,
            } => {
                tracing::error!("Upstream error ({upstream_status}): {message}");
                (
                    StatusCode::from_u16(*upstream_status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "UPSTREAM_ERROR",
                    message.clone(),
                )
            }
            // The raw model text rides along in the message so a failed
            // reply can be diagnosed from the response alone.
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    e.to_string(),
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

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("missing required field: destination".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_propagates_provider_status() {
        let response = AppError::Upstream {
            status: 429,
            message: "Rate limit reached".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_with_unparseable_status_falls_back_to_bad_gateway() {
        let response = AppError::Upstream {
            status: 0,
            message: "connection reset".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_extraction_maps_to_server_error() {
        let response = AppError::Extraction(ExtractionError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
