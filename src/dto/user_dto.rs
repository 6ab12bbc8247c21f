use crate::entity::user::{NewUser, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Required fields are missing"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Required fields are missing"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Required fields are missing"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Required fields are missing"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Required fields are missing"))]
    pub last_name: String,
    #[validate(required(message = "Required fields are missing"))]
    pub role_id: Option<Uuid>,
    pub department: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl CreateUserDto {
    /// Split into the storable draft and the plaintext password.
    pub fn into_parts(self) -> (NewUser, String) {
        let draft = NewUser {
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role_id: self.role_id.unwrap_or_default(),
            department: self.department,
            is_active: self.is_active,
        };
        (draft, self.password)
    }
}

/// Administrator update. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "First name and last name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "First name and last name cannot be empty"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub department: Option<Option<String>>,
    pub role_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl UpdateUserDto {
    pub fn apply(self, user: &mut User) {
        UpdateProfileDto {
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
        }
        .apply(user);

        if let Some(role_id) = self.role_id {
            user.role_id = role_id;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// Self-service update. Role and active flag are not part of this shape, so any
/// such fields in the body are dropped during deserialization.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "First name and last name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "First name and last name cannot be empty"))]
    pub last_name: Option<String>,
    /// Absent keeps the stored department; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub department: Option<Option<String>>,
}

impl UpdateProfileDto {
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(department) = self.department {
            user.department = department;
        }
    }
}

/// Wraps whatever is present, `null` included, so `None` only means "field missing".
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct DeleteUsersDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "No user IDs provided"))]
    pub ids: Vec<Uuid>,
}

/// Public view of a user. There is no field for the password hash.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserReadDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<User> for UserReadDto {
    fn from(model: User) -> UserReadDto {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role_id: model.role_id,
            department: model.department,
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_active: model.is_active,
        }
    }
}

impl std::fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role_id", &self.role_id)
            .field("department", &self.department)
            .field("is_active", &self.is_active)
            .finish()
    }
}
