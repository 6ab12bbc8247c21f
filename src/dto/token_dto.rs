use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::token_error::TokenError;

/// Claims carried by both access and refresh tokens. They differ only in `exp` and `jti`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub sub: String,
    pub exp: i64,
    pub jti: String, // reserved for revocation, nothing reads it yet
}

impl TokenClaimsDto {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidSubject)
    }
}

/// Freshly minted access + refresh pair.
#[derive(Clone)]
pub struct TokenDetails {
    pub access_token: String,
    pub refresh_token: String,
    pub access_uuid: String,
    pub refresh_uuid: String,
    pub at_expires: i64,
    pub rt_expires: i64,
}

impl TokenDetails {
    /// Value reported as `expires_in`.
    ///
    /// Access expiry minus refresh expiry. This is negative and does not match the
    /// field name; it is kept as-is until the intended meaning is settled.
    pub fn expires_in(&self) -> i64 {
        self.at_expires - self.rt_expires
    }
}

impl std::fmt::Debug for TokenDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDetails")
            .field("access_uuid", &self.access_uuid)
            .field("refresh_uuid", &self.refresh_uuid)
            .field("at_expires", &self.at_expires)
            .field("rt_expires", &self.rt_expires)
            .finish()
    }
}

#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub expires_in: i64,
}

#[derive(Clone, Deserialize, Validate)]
pub struct RefreshTokenRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<TokenDetails> for RefreshTokenResponseDto {
    fn from(tokens: TokenDetails) -> Self {
        Self {
            expires_in: tokens.expires_in(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

impl std::fmt::Debug for LoginRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish()
    }
}

impl std::fmt::Debug for RefreshTokenRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRequest").finish_non_exhaustive()
    }
}
