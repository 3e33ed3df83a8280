use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please enter a valid URL first.")]
    EmptyUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown summary profile '{name}', expected one of: {expected}")]
    UnknownProfile { name: String, expected: String },

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("{0}")]
    Extraction(String),

    #[error("LLM processing error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0} timed out")]
    Timeout(String),
}

/// How the page should present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyUrl
            | AppError::InvalidUrl(_)
            | AppError::InvalidRequest(_)
            | AppError::UnknownProfile { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FetchError(_) | AppError::LlmError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AppError::EmptyUrl
            | AppError::InvalidUrl(_)
            | AppError::InvalidRequest(_)
            | AppError::UnknownProfile { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Message shown to the user. Input problems and empty articles keep their
    /// own wording; any other failure collapses into one generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyUrl
            | AppError::InvalidUrl(_)
            | AppError::InvalidRequest(_)
            | AppError::UnknownProfile { .. }
            | AppError::Extraction(_) => self.to_string(),
            other => format!("An error occurred: {}", other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error::<()>(self.status(), self.severity(), self.user_message()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("Request to {}", err.url().map(|u| u.as_str()).unwrap_or("upstream")))
        } else {
            AppError::FetchError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
