use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
    Json
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("Question not found")]
    NotFound,
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(err) => {
                error!("Database error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Question not found".to_string()),
            ApiError::InvalidLimit(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidQuestion(msg) => (StatusCode::BAD_REQUEST, msg),
            // Keep axum's status (400/415/422) but answer in the same JSON shape
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::InvalidQuery(rejection) => (rejection.status(), rejection.body_text()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
