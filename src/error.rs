use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Row index {row} out of range for {len} catalog rows")]
    IndexOutOfRange { row: usize, len: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Initialization(_) | AppError::IndexOutOfRange { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Reasons a single metadata lookup can fail.
///
/// These never reach callers of the provider; each one is mapped to the
/// fallback details and logged.
#[derive(thiserror::Error, Debug)]
pub enum EnrichmentFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl EnrichmentFailure {
    /// Short label used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            EnrichmentFailure::Transport(_) => "transport",
            EnrichmentFailure::Timeout => "timeout",
            EnrichmentFailure::Status(_) => "status",
            EnrichmentFailure::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for EnrichmentFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EnrichmentFailure::Timeout
        } else if err.is_decode() {
            EnrichmentFailure::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            EnrichmentFailure::Status(status.as_u16())
        } else {
            EnrichmentFailure::Transport(err.to_string())
        }
    }
}
