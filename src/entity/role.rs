use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the only role the service treats specially.
pub const ADMIN_ROLE: &str = "Admin";

#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Opaque permission document; nothing reads it yet.
    pub permissions: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
