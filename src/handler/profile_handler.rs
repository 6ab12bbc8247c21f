use crate::config::logging::secure_log;
use crate::dto::user_dto::{UpdateProfileDto, UserReadDto};
use crate::error::{AppError, ValidatedRequest};
use crate::middleware::auth::CurrentUser;
use crate::state::user_state::UserState;
use axum::{Extension, Json, extract::State};

/// Served from the user the auth middleware loaded for this request.
pub async fn get_me(Extension(current_user): Extension<CurrentUser>) -> Json<UserReadDto> {
    secure_log::sensitive_debug!("Profile accessed by: {}", current_user.user.username);

    Json(UserReadDto::from(current_user.user))
}

pub async fn update_me(
    State(state): State<UserState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedRequest(payload): ValidatedRequest<UpdateProfileDto>,
) -> Result<Json<UserReadDto>, AppError> {
    let user = state
        .user_service
        .update_profile(current_user.user_id, payload)
        .await?;

    Ok(Json(user))
}
