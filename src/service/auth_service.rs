use crate::config::logging::secure_log;
use crate::dto::token_dto::TokenDetails;
use crate::entity::user::User;
use crate::error::{AppError, DbError, TokenError, UserError};
use crate::repository::user_repository::DynUserRepository;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use tracing::{info, warn};

/// Login and refresh on top of the repository and the token codec.
#[derive(Clone)]
pub struct AuthService {
    user_repo: DynUserRepository,
    token_service: TokenService,
}

impl AuthService {
    pub fn new(user_repo: DynUserRepository, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Unknown user, wrong password and disabled account all surface as
    /// `UserError::InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<(TokenDetails, User), AppError> {
        let user = match self.user_repo.authenticate(username, password).await {
            Ok(user) => user,
            Err(DbError::InvalidCredentials) | Err(DbError::AccountDisabled) => {
                return Err(UserError::InvalidCredentials)?;
            }
            Err(e) => {
                secure_log::secure_error!("Authentication failed unexpectedly", e);
                return Err(UserError::InvalidCredentials)?;
            }
        };

        let tokens = self.token_service.mint(&user.id.to_string())?;
        info!("SECURITY: Tokens issued for user ID: {}", user.id);

        Ok((tokens, user))
    }

    /// Issues a new pair for the refresh token's subject. The presented token stays
    /// valid until it expires.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenDetails, AppError> {
        let claims = self.token_service.validate(refresh_token).map_err(|e| {
            warn!("SECURITY: Refresh token rejected: {}", e);
            TokenError::InvalidRefreshToken
        })?;
        let user_id = claims.user_id().map_err(|_| TokenError::InvalidRefreshToken)?;

        match self.user_repo.get_by_id(user_id).await {
            Ok(user) if user.is_active => {}
            Ok(user) => {
                warn!("SECURITY: Refresh attempt for disabled user ID: {}", user.id);
                return Err(TokenError::InvalidRefreshToken)?;
            }
            Err(DbError::NotFound) => {
                warn!("SECURITY: Refresh attempt for unknown user ID: {}", user_id);
                return Err(TokenError::InvalidRefreshToken)?;
            }
            Err(e) => {
                secure_log::secure_error!("User lookup during refresh failed", e);
                return Err(TokenError::InvalidRefreshToken)?;
            }
        }

        let tokens = self.token_service.mint(&claims.sub)?;
        info!("SECURITY: Tokens refreshed for user ID: {}", user_id);
        Ok(tokens)
    }
}
