use crate::response::app_response::ErrorResponse;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::{Json, response::{IntoResponse, Response}, http::StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{}", first_validation_message(.0))]
    ValidationError(#[from] validator::ValidationErrors),
    #[error("Invalid request payload")]
    JsonRejection(#[from] JsonRejection),
    #[error("Invalid user ID format")]
    InvalidId,
}

/// JSON body that has been deserialized and passed its `Validate` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedRequest<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedRequest<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await
            .map_err(RequestError::JsonRejection)?;
        value.validate()?;
        Ok(ValidatedRequest(value))
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        ErrorResponse::send(self.to_string())
            .with_status(StatusCode::BAD_REQUEST)
            .into_response()
    }
}

/// Message of the alphabetically first failing field, so the response is stable.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request payload".to_string())
}
