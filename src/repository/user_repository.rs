use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::entity::role::Role;
use crate::entity::user::{NewUser, User};
use crate::error::db_error::DbError;
use crate::service::password_service;
use async_trait::async_trait;
use sqlx;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, role_id, department, created_at, updated_at, is_active";

pub type DynUserRepository = Arc<dyn UserRepositoryTrait>;

/// Storage contract for users and roles.
///
/// Every method is a single statement. Dropping the returned future (client gone,
/// request deadline hit) abandons the statement and returns the connection to the pool.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<User, DbError>;
    async fn get_by_username(&self, username: &str) -> Result<User, DbError>;
    async fn get_all(&self) -> Result<Vec<User>, DbError>;
    /// Hashes `password`, inserts the row and returns it with `id` and timestamps filled in.
    async fn create(&self, draft: NewUser, password: &str) -> Result<User, DbError>;
    /// Persists the mutable fields of `user` and refreshes its `updated_at`.
    async fn update(&self, user: &mut User) -> Result<(), DbError>;
    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), DbError>;
    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), DbError>;
    async fn get_role_by_id(&self, id: Uuid) -> Result<Role, DbError>;

    /// Unknown user and wrong password both yield `InvalidCredentials`;
    /// a known but disabled user yields `AccountDisabled`.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DbError> {
        let user = match self.get_by_username(username).await {
            Ok(user) => user,
            Err(DbError::NotFound) => {
                secure_log::sensitive_debug!("Login failed - unknown username: {}", username);
                return Err(DbError::InvalidCredentials);
            }
            Err(e) => {
                secure_log::secure_error!("User lookup during authentication failed", e);
                return Err(DbError::InvalidCredentials);
            }
        };

        if !user.is_active {
            warn!("SECURITY: Login attempt for disabled user ID: {}", user.id);
            return Err(DbError::AccountDisabled);
        }

        if !password_service::verify_password(&user.password_hash, password).await {
            warn!("SECURITY: Invalid password attempt for user ID: {}", user.id);
            return Err(DbError::InvalidCredentials);
        }

        info!("SECURITY: Successful authentication for user ID: {}", user.id);
        Ok(user)
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl UserRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<User, DbError> {
        let start = std::time::Instant::now();

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        match sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(self.db_conn.get_pool())
            .await
        {
            Ok(user) => {
                let _duration = start.elapsed();
                secure_log::sensitive_debug!("User lookup by ID completed in {:?}", _duration);
                Ok(user)
            }
            Err(sqlx::Error::RowNotFound) => Err(DbError::NotFound),
            Err(e) => {
                secure_log::secure_error!("User lookup by ID failed", e);
                Err(e.into())
            }
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DbError> {
        let start = std::time::Instant::now();

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        match sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_one(self.db_conn.get_pool())
            .await
        {
            Ok(user) => {
                let _duration = start.elapsed();
                secure_log::sensitive_debug!("User lookup by username completed in {:?}", _duration);
                Ok(user)
            }
            Err(sqlx::Error::RowNotFound) => Err(DbError::NotFound),
            Err(e) => {
                secure_log::secure_error!("User lookup by username failed", e);
                Err(e.into())
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<User>, DbError> {
        let start = std::time::Instant::now();

        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
        match sqlx::query_as::<_, User>(&query)
            .fetch_all(self.db_conn.get_pool())
            .await
        {
            Ok(users) => {
                info!("Loaded {} users in {:?}", users.len(), start.elapsed());
                Ok(users)
            }
            Err(e) => {
                secure_log::secure_error!("User listing failed", e);
                Err(e.into())
            }
        }
    }

    async fn create(&self, draft: NewUser, password: &str) -> Result<User, DbError> {
        let password_hash = password_service::hash_password(password).await?;
        let id = Uuid::now_v7();

        let query = format!(
            "INSERT INTO users (id, username, email, password_hash, first_name, last_name, role_id, department, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        );

        match sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&draft.username)
            .bind(&draft.email)
            .bind(&password_hash)
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(draft.role_id)
            .bind(&draft.department)
            .bind(draft.is_active)
            .fetch_one(self.db_conn.get_pool())
            .await
        {
            Ok(user) => {
                info!("User created with ID: {}", user.id);
                Ok(user)
            }
            Err(e) => {
                let error = DbError::from(e);
                if !matches!(error, DbError::UniqueViolation { .. }) {
                    secure_log::secure_error!("Failed to insert user", error);
                }
                Err(error)
            }
        }
    }

    async fn update(&self, user: &mut User) -> Result<(), DbError> {
        match sqlx::query_scalar::<_, chrono::DateTime<chrono::Utc>>(
            "UPDATE users SET first_name = $1, last_name = $2, department = $3, role_id = $4, is_active = $5, updated_at = NOW() \
             WHERE id = $6 RETURNING updated_at"
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.department)
        .bind(user.role_id)
        .bind(user.is_active)
        .bind(user.id)
        .fetch_one(self.db_conn.get_pool())
        .await
        {
            Ok(updated_at) => {
                user.updated_at = updated_at;
                Ok(())
            }
            Err(sqlx::Error::RowNotFound) => Err(DbError::NotFound),
            Err(e) => {
                secure_log::secure_error!("Failed to update user", e);
                Err(e.into())
            }
        }
    }

    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), DbError> {
        let password_hash = password_service::hash_password(password).await?;

        match sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2"
        )
        .bind(&password_hash)
        .bind(id)
        .execute(self.db_conn.get_pool())
        .await
        {
            Ok(result) if result.rows_affected() == 0 => Err(DbError::NotFound),
            Ok(_) => {
                info!("SECURITY: Password updated for user ID: {}", id);
                Ok(())
            }
            Err(e) => {
                secure_log::secure_error!("Failed to update password", e);
                Err(e.into())
            }
        }
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), DbError> {
        match sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(self.db_conn.get_pool())
            .await
        {
            Ok(result) => {
                info!("Deleted {} of {} requested users", result.rows_affected(), ids.len());
                Ok(())
            }
            Err(e) => {
                secure_log::secure_error!("Failed to delete users", e);
                Err(e.into())
            }
        }
    }

    async fn get_role_by_id(&self, id: Uuid) -> Result<Role, DbError> {
        match sqlx::query_as::<_, Role>(
            "SELECT id, name, COALESCE(description, '') AS description, permissions, created_at, updated_at FROM roles WHERE id = $1"
        )
        .bind(id)
        .fetch_one(self.db_conn.get_pool())
        .await
        {
            Ok(role) => Ok(role),
            Err(sqlx::Error::RowNotFound) => Err(DbError::NotFound),
            Err(e) => {
                secure_log::secure_error!("Role lookup by ID failed", e);
                Err(e.into())
            }
        }
    }
}
