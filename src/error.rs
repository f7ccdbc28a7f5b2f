use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::AskResponse;

/// Generic reply sent with every HTTP 500.
pub const SERVER_ERROR_REPLY: &str = "❌ Server error occurred";

pub type Result<T> = std::result::Result<T, InquisterError>;

#[derive(Error, Debug)]
pub enum InquisterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Upstream response contained no text")]
    EmptyResponse,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InquisterError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InquisterError::Timeout { .. })
    }
}

impl From<reqwest::Error> for InquisterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            InquisterError::Decode(e.to_string())
        } else {
            InquisterError::Network(e.to_string())
        }
    }
}

impl IntoResponse for InquisterError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        let body = Json(AskResponse::new(SERVER_ERROR_REPLY));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
