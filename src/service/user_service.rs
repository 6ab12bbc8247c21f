use crate::config::logging::secure_log;
use crate::dto::user_dto::{CreateUserDto, UpdateProfileDto, UpdateUserDto, UserReadDto};
use crate::entity::user::User;
use crate::error::{AppError, DbError, UserError};
use crate::repository::user_repository::DynUserRepository;
use tracing::info;
use uuid::Uuid;

/// Administrator and self-service operations on user records.
#[derive(Clone)]
pub struct UserService {
    user_repo: DynUserRepository,
}

impl UserService {
    pub fn new(user_repo: DynUserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn list_users(&self) -> Result<Vec<UserReadDto>, AppError> {
        let users = self.user_repo.get_all().await.map_err(|e| {
            secure_log::secure_error!("Failed to list users", e);
            DbError::SomethingWentWrong("Error fetching users".to_string())
        })?;

        Ok(users.into_iter().map(UserReadDto::from).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<UserReadDto, AppError> {
        match self.user_repo.get_by_id(id).await {
            Ok(user) => Ok(UserReadDto::from(user)),
            Err(DbError::NotFound) => Err(UserError::UserNotFound)?,
            Err(e) => {
                secure_log::secure_error!("Failed to fetch user", e);
                Err(DbError::SomethingWentWrong("Error fetching user".to_string()))?
            }
        }
    }

    pub async fn create_user(&self, payload: CreateUserDto) -> Result<UserReadDto, AppError> {
        let (draft, password) = payload.into_parts();
        secure_log::sensitive_debug!("Creating user: {}", draft.username);

        match self.user_repo.create(draft, &password).await {
            Ok(user) => {
                info!("User created with ID: {}", user.id);
                Ok(UserReadDto::from(user))
            }
            Err(DbError::UniqueViolation { constraint }) => {
                Err(classify_duplicate(constraint.as_deref()))?
            }
            Err(e) => {
                secure_log::secure_error!("Failed to create user", e);
                Err(DbError::SomethingWentWrong("Error creating user".to_string()))?
            }
        }
    }

    pub async fn update_user(&self, id: Uuid, payload: UpdateUserDto) -> Result<UserReadDto, AppError> {
        let mut user = self.load_for_update(id).await?;
        payload.apply(&mut user);
        self.save(&mut user).await?;

        info!("User {} updated by administrator", id);
        Ok(UserReadDto::from(user))
    }

    /// Self-service update. The row is re-read so a concurrent role or status change
    /// made by an administrator is not overwritten with the middleware's snapshot.
    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfileDto) -> Result<UserReadDto, AppError> {
        let mut user = self.load_for_update(id).await?;
        payload.apply(&mut user);
        self.save(&mut user).await?;

        Ok(UserReadDto::from(user))
    }

    pub async fn delete_users(&self, ids: &[Uuid]) -> Result<(), AppError> {
        self.user_repo.delete_many(ids).await.map_err(|e| {
            secure_log::secure_error!("Failed to delete users", e);
            DbError::SomethingWentWrong("Error deleting users".to_string())
        })?;

        info!("Bulk delete of {} user IDs completed", ids.len());
        Ok(())
    }

    async fn load_for_update(&self, id: Uuid) -> Result<User, AppError> {
        match self.user_repo.get_by_id(id).await {
            Ok(user) => Ok(user),
            Err(DbError::NotFound) => Err(UserError::UserNotFound)?,
            Err(e) => {
                secure_log::secure_error!("Failed to load user for update", e);
                Err(DbError::SomethingWentWrong("Error updating user".to_string()))?
            }
        }
    }

    async fn save(&self, user: &mut User) -> Result<(), AppError> {
        match self.user_repo.update(user).await {
            Ok(()) => Ok(()),
            Err(DbError::NotFound) => Err(UserError::UserNotFound)?,
            Err(e) => {
                secure_log::secure_error!("Failed to update user", e);
                Err(DbError::SomethingWentWrong("Error updating user".to_string()))?
            }
        }
    }
}

/// Maps the violated unique constraint to the message shown to the administrator.
fn classify_duplicate(constraint: Option<&str>) -> UserError {
    match constraint {
        Some(name) if name.contains("username") => UserError::UsernameTaken,
        Some(name) if name.contains("email") => UserError::EmailTaken,
        _ => UserError::UserAlreadyExists,
    }
}
