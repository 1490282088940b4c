use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Precomputed catalog or similarity data is missing or malformed
    #[error("Failed to load data: {0}")]
    Load(String),

    #[error("Movie not found: {0}")]
    NotFound(String),

    /// A position outside the catalog reached a lookup; the catalog and a
    /// similarity index disagree about their size
    #[error("Position {position} out of range for catalog of {len} movies")]
    OutOfRange { position: usize, len: usize },

    #[error("Metadata gateway error: {0}")]
    Gateway(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Load(_) | AppError::OutOfRange { .. } | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request aborted");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
