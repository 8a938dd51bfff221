use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;
use crate::users::UserStoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Short plain-text rejection consumed directly by the pages' scripts.
    #[error("{1}")]
    Plain(StatusCode, &'static str),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Plain(status, msg) => return (*status, *msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::UserStore(e) => {
                tracing::error!("User store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "USER_STORE_ERROR",
                    "The user store is unavailable".to_string(),
                )
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SESSION_ERROR",
                    "Session state could not be read or written".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The document could not be generated".to_string(),
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
