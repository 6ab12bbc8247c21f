use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error body shared by every route: `{"error": "<message>"}`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl ErrorResponse {
    /// Create an error response with default 400 Bad Request status
    pub fn send(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Set custom status code (builder pattern)
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Plain acknowledgement body: `{"message": "..."}`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn send(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}
