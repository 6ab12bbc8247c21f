use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Authorization header is required")]
    MissingToken,
    #[error("Authorization header format must be Bearer {{token}}")]
    MalformedHeader,
    #[error("Invalid or expired token")]
    InvalidToken(String),
    #[error("Invalid or expired token")]
    TokenExpired,
    #[error("Invalid user ID in token")]
    InvalidSubject,
    #[error("User not found")]
    UnknownSubject,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("Token error: {0}")]
    TokenCreationError(String),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let status_code = match self {
            TokenError::TokenCreationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };

        let message = match self {
            TokenError::TokenCreationError(_) => "Error generating tokens".to_string(),
            other => other.to_string(),
        };

        ErrorResponse::send(message).with_status(status_code).into_response()
    }
}
