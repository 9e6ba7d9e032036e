//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  Axum's `IntoResponse` impl
//! converts these into structured JSON error bodies so the dashboard always
//! gets a machine-readable response even on failure.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request payload was syntactically correct but semantically invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource does not exist (e.g. scanner not running).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation clashes with the current state (e.g. scanner already running).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The access token file is absent or empty.
    #[error("Access token missing: {}", .0.display())]
    TokenMissing(PathBuf),

    /// The quote API rejected our token — ต้องเปลี่ยนไฟล์ token ใหม่
    #[error("Access token expired or invalid: {0}")]
    TokenExpired(String),

    /// The quote API returned an error or could not be reached.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::TokenMissing(_) => (StatusCode::PRECONDITION_FAILED, self.to_string()),
            AppError::TokenExpired(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {err}"),
            ),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
