pub mod auth_service;
pub mod password_service;
pub mod role_cache;
pub mod token_service;
pub mod user_service;
