use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use thiserror::Error;
use tracing::error;

use crate::core::{app_state::ConfigError, http::response_envelope::ApiError};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("{0}")]
    BadRequest(String),

    /// The chat pipeline or the provider behind it failed.
    #[error("Failed to process request")]
    Processing(#[source] ContextorError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Processing(cause) => {
                error!(error = %cause, "chat request failed");
                ApiError::new(self.to_string()).with_details(cause.to_string())
            }
            _ => ApiError::new(self.to_string()),
        };
        body.into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Validation failures are the caller's fault; everything else is ours.
impl From<ContextorError> for AppError {
    fn from(err: ContextorError) -> Self {
        match err {
            ContextorError::Validation(msg) => AppError::BadRequest(msg.to_string()),
            other => AppError::Processing(other),
        }
    }
}
