use crate::dto::token_dto::{RefreshTokenRequestDto, RefreshTokenResponseDto};
use crate::error::{AppError, ValidatedRequest};
use crate::state::auth_state::AuthState;
use axum::{Json, extract::State};

/// Exchange a refresh token for a new access/refresh pair
pub async fn refresh_token(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RefreshTokenRequestDto>,
) -> Result<Json<RefreshTokenResponseDto>, AppError> {
    let tokens = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(RefreshTokenResponseDto::from(tokens)))
}
