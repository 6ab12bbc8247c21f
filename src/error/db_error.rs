use crate::response::app_response::ErrorResponse;
use crate::service::password_service::PasswordError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures surfaced by the user repository.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("record not found")]
    NotFound,
    #[error("unique constraint violated: {}", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user account is disabled")]
    AccountDisabled,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Sqlx(sqlx::Error),
    #[error("{0}")]
    SomethingWentWrong(String),
}

impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                DbError::UniqueViolation {
                    constraint: db_error.constraint().map(str::to_string),
                }
            }
            other => DbError::Sqlx(other),
        }
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        let message = match self {
            DbError::SomethingWentWrong(message) => message,
            _ => "Internal server error".to_string(),
        };

        ErrorResponse::send(message)
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response()
    }
}
