use crate::dto::user_dto::{CreateUserDto, DeleteUsersDto, UpdateUserDto, UserReadDto};
use crate::error::{AppError, RequestError, ValidatedRequest};
use crate::response::app_response::MessageResponse;
use crate::state::user_state::UserState;
use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use uuid::Uuid;

fn parse_user_id(raw: &str) -> Result<Uuid, RequestError> {
    Uuid::parse_str(raw).map_err(|_| RequestError::InvalidId)
}

pub async fn list_users(State(state): State<UserState>) -> Result<Json<Vec<UserReadDto>>, AppError> {
    Ok(Json(state.user_service.list_users().await?))
}

pub async fn get_user(
    State(state): State<UserState>,
    Path(id): Path<String>,
) -> Result<Json<UserReadDto>, AppError> {
    let id = parse_user_id(&id)?;
    Ok(Json(state.user_service.find_by_id(id).await?))
}

pub async fn create_user(
    State(state): State<UserState>,
    ValidatedRequest(payload): ValidatedRequest<CreateUserDto>,
) -> Result<(StatusCode, Json<UserReadDto>), AppError> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<UserState>,
    Path(id): Path<String>,
    ValidatedRequest(payload): ValidatedRequest<UpdateUserDto>,
) -> Result<Json<UserReadDto>, AppError> {
    let id = parse_user_id(&id)?;
    Ok(Json(state.user_service.update_user(id, payload).await?))
}

pub async fn delete_users(
    State(state): State<UserState>,
    ValidatedRequest(payload): ValidatedRequest<DeleteUsersDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state.user_service.delete_users(&payload.ids).await?;
    Ok(MessageResponse::send("Users deleted successfully"))
}
