//! Error types for the catalog actions server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::request::Field;

/// Infrastructure errors that abort a request
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details stay in the logs, the client gets a generic page
        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred. Please try again later.",
        )
            .into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// A failed submission, shown to the requester as a danger message.
///
/// The display text is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Your session has expired. Please try again.")]
    Csrf,

    #[error("Please complete all missing fields.")]
    MissingFields(Vec<Field>),

    #[error("Please specify a valid email address.")]
    InvalidEmail,

    #[error("Please specify a valid phone number.")]
    InvalidPhone,

    #[error("Please choose a date at least three weekdays from now.")]
    DateTooSoon,

    #[error("Could not send email.")]
    SendFailed,

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,
}

impl RequestError {
    /// Form fields to highlight in the re-rendered view
    pub fn fields(&self) -> Vec<Field> {
        match self {
            RequestError::MissingFields(fields) => fields.clone(),
            RequestError::InvalidEmail => vec![Field::Email],
            RequestError::InvalidPhone => vec![Field::Tel],
            RequestError::DateTooSoon => vec![Field::Date],
            RequestError::Csrf | RequestError::SendFailed | RequestError::Unexpected => Vec::new(),
        }
    }
}
