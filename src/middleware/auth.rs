use crate::config::logging::secure_log;
use crate::entity::user::User;
use crate::error::{AppError, AuthorizationError, DbError, TokenError, UserError};
use crate::middleware::real_ip::ClientIp;
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::http::{self, HeaderMap, Request};
use axum::{middleware::Next, response::IntoResponse};
use tracing::{info, warn};
use uuid::Uuid;

/// Identity of the caller, attached to the request by [`auth`].
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub user: User,
    pub role_name: String,
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, TokenError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(TokenError::MissingToken)?
        .to_str()
        .map_err(|_| TokenError::MalformedHeader)?;

    match header.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(TokenError::MalformedHeader),
    }
}

pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let client_ip = req
        .extensions()
        .get::<ClientIp>()
        .map(|ip| ip.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let token = extract_bearer(req.headers()).inspect_err(|e| {
        warn!("SECURITY: Rejected authorization header from IP {}: {}", client_ip, e);
    })?;

    let claims = state.token_service.validate(token).inspect_err(|e| {
        warn!("SECURITY: Invalid token from IP: {}", client_ip);
        secure_log::sensitive_debug!("Token validation error: {:?}", e);
    })?;
    let user_id = claims.user_id()?;

    let user = match state.user_repo.get_by_id(user_id).await {
        Ok(user) => user,
        Err(DbError::NotFound) => {
            warn!("SECURITY: Token for unknown user ID {} from IP: {}", user_id, client_ip);
            return Err(TokenError::UnknownSubject)?;
        }
        Err(e) => {
            secure_log::secure_error!("User lookup in auth middleware failed", e);
            return Err(TokenError::UnknownSubject)?;
        }
    };

    if !user.is_active {
        warn!("SECURITY: Token presented for disabled user ID {} from IP: {}", user.id, client_ip);
        return Err(UserError::AccountDisabled)?;
    }

    let role = state
        .role_cache
        .get_or_load(user.role_id, state.user_repo.as_ref())
        .await
        .map_err(|e| {
            secure_log::secure_error!("Role lookup failed", e);
            AuthorizationError::RoleLookupFailed
        })?;

    info!("SECURITY: Authenticated user ID {} from IP: {}", user.id, client_ip);
    req.extensions_mut().insert(CurrentUser {
        user_id,
        user,
        role_name: role.name,
    });

    Ok(next.run(req).await)
}
