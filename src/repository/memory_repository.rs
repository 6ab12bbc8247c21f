//! Process-local user store.
//!
//! Mirrors the Postgres repository's contract, including the unique `username` and
//! `email` constraints, so the router can be exercised without a database.

use crate::entity::role::Role;
use crate::entity::user::{NewUser, User};
use crate::error::db_error::DbError;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::password_service;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const USERNAME_CONSTRAINT: &str = "users_username_key";
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
    roles: RwLock<HashMap<Uuid, Role>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new instance wrapped in Arc for sharing across threads
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Roles are provisioned out of band; this is the in-memory equivalent.
    pub async fn insert_role(&self, name: &str) -> Role {
        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{} role", name),
            permissions: None,
            created_at: now,
            updated_at: now,
        };
        self.roles.write().await.insert(role.id, role.clone());
        role
    }

    pub async fn rename_role(&self, id: Uuid, name: &str) {
        if let Some(role) = self.roles.write().await.get_mut(&id) {
            role.name = name.to_string();
            role.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryUserRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<User, DbError> {
        self.users.read().await.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DbError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<User>, DbError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|user| (user.created_at, user.id));
        Ok(users)
    }

    async fn create(&self, draft: NewUser, password: &str) -> Result<User, DbError> {
        let password_hash = password_service::hash_password(password).await?;

        // Uniqueness check and insert happen under one write lock, like a single INSERT.
        let mut users = self.users.write().await;
        if users.values().any(|user| user.username == draft.username) {
            return Err(DbError::UniqueViolation {
                constraint: Some(USERNAME_CONSTRAINT.to_string()),
            });
        }
        if users.values().any(|user| user.email == draft.email) {
            return Err(DbError::UniqueViolation {
                constraint: Some(EMAIL_CONSTRAINT.to_string()),
            });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: draft.username,
            email: draft.email,
            password_hash,
            first_name: draft.first_name,
            last_name: draft.last_name,
            role_id: draft.role_id,
            department: draft.department,
            created_at: now,
            updated_at: now,
            is_active: draft.is_active,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &mut User) -> Result<(), DbError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(DbError::NotFound)?;

        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.department = user.department.clone();
        stored.role_id = user.role_id;
        stored.is_active = user.is_active;
        stored.updated_at = Utc::now().max(stored.created_at);

        user.updated_at = stored.updated_at;
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), DbError> {
        let password_hash = password_service::hash_password(password).await?;

        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(DbError::NotFound)?;
        stored.password_hash = password_hash;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), DbError> {
        let mut users = self.users.write().await;
        for id in ids {
            users.remove(id);
        }
        Ok(())
    }

    async fn get_role_by_id(&self, id: Uuid) -> Result<Role, DbError> {
        self.roles.read().await.get(&id).cloned().ok_or(DbError::NotFound)
    }
}
