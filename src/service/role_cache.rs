use crate::entity::role::Role;
use crate::error::db_error::DbError;
use crate::repository::user_repository::UserRepositoryTrait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Short-lived role lookups shared by every request.
///
/// A zero TTL disables caching. Failed loads are never cached.
#[derive(Clone)]
pub struct RoleCache {
    entries: Arc<DashMap<Uuid, (Role, Instant)>>,
    ttl: Duration,
}

impl RoleCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub async fn get_or_load(
        &self,
        role_id: Uuid,
        user_repo: &dyn UserRepositoryTrait,
    ) -> Result<Role, DbError> {
        if self.ttl.is_zero() {
            return user_repo.get_role_by_id(role_id).await;
        }

        if let Some(entry) = self.entries.get(&role_id) {
            let (role, loaded_at) = entry.value();
            if loaded_at.elapsed() < self.ttl {
                return Ok(role.clone());
            }
        }

        let role = user_repo.get_role_by_id(role_id).await?;
        self.cleanup();
        self.entries.insert(role_id, (role.clone(), Instant::now()));
        Ok(role)
    }

    /// Drop entries older than the TTL
    pub fn cleanup(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, (_, loaded_at)| loaded_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
