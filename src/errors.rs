use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Request-level failures of the HTTP surface. The stores themselves never
/// fail; these only reject input that names nothing the dashboard knows.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("direction must be 'increment' or 'decrement', got '{0}'")]
    InvalidDirection(String),

    #[error("{0}")]
    InvalidTheme(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidDirection(_) | AppError::InvalidTheme(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
