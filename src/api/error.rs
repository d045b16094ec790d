use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::relay::RelayError;

use super::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Relay(RelayError::MissingPrompt) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("No prompt provided"),
            ),
            ApiError::Relay(RelayError::Upstream { details, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_details("Gemini API error", details),
            ),
            ApiError::Relay(RelayError::UnexpectedFormat) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Unexpected Gemini response format"),
            ),
            ApiError::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details("Invalid JSON body", rejection.body_text()),
            ),
        };

        (status, Json(body)).into_response()
    }
}
