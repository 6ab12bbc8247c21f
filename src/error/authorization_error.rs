use crate::response::app_response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Admin permission required")]
    AdminRequired,
    #[error("Error fetching user role")]
    RoleLookupFailed,
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AuthorizationError::AdminRequired => StatusCode::FORBIDDEN,
            AuthorizationError::RoleLookupFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
