use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures about user accounts that the caller is allowed to see.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("User already exists")]
    UserAlreadyExists,
    /// Covers unknown username and wrong password alike.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User account is disabled")]
    AccountDisabled,
}

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::UserNotFound => StatusCode::NOT_FOUND,
            UserError::UsernameTaken | UserError::EmailTaken | UserError::UserAlreadyExists => {
                StatusCode::BAD_REQUEST
            }
            UserError::InvalidCredentials | UserError::AccountDisabled => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
