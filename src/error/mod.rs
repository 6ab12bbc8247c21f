pub(crate) mod authorization_error;
pub(crate) mod db_error;
pub(crate) mod request_error;
pub(crate) mod token_error;
pub(crate) mod user_error;

pub use authorization_error::AuthorizationError;
pub use db_error::DbError;
pub use request_error::{RequestError, ValidatedRequest};
pub use token_error::TokenError;
pub use user_error::UserError;

// Unified application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Authorization(error) => error.into_response(),
            AppError::Token(error) => error.into_response(),
            AppError::User(error) => error.into_response(),
            AppError::Db(error) => error.into_response(),
            AppError::Request(error) => error.into_response(),
        }
    }
}
