use crate::config::logging::secure_log;
use crate::dto::token_dto::{LoginRequestDto, LoginResponseDto};
use crate::error::{AppError, ValidatedRequest};
use crate::middleware::auth::CurrentUser;
use crate::response::app_response::MessageResponse;
use crate::state::auth_state::AuthState;
use axum::{Extension, Json, extract::State};
use tracing::info;

const PASSWORD_RESET_PENDING: &str = "Password reset functionality not implemented yet";

pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LoginRequestDto>,
) -> Result<Json<LoginResponseDto>, AppError> {
    secure_log::sensitive_debug!("Login attempt for username: {}", payload.username);

    let (tokens, user) = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponseDto {
        expires_in: tokens.expires_in(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user_id: user.id.to_string(),
        username: user.username,
        email: user.email,
    }))
}

/// Acknowledges the logout. Issued tokens stay valid until they expire.
pub async fn logout(Extension(current_user): Extension<CurrentUser>) -> Json<MessageResponse> {
    info!("User ID {} logged out", current_user.user_id);
    MessageResponse::send("Logged out successfully")
}

pub async fn forgot_password() -> Json<MessageResponse> {
    MessageResponse::send(PASSWORD_RESET_PENDING)
}

pub async fn reset_password() -> Json<MessageResponse> {
    MessageResponse::send(PASSWORD_RESET_PENDING)
}
