use crate::entity::role::ADMIN_ROLE;
use crate::error::AuthorizationError;
use crate::middleware::auth::CurrentUser;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Admin gate. Must run after [`crate::middleware::auth::auth`].
pub async fn require_admin(req: Request, next: Next) -> Response {
    let allowed = req
        .extensions()
        .get::<CurrentUser>()
        .is_some_and(|current| current.role_name == ADMIN_ROLE);

    if !allowed {
        let user_id = req.extensions().get::<CurrentUser>().map(|current| current.user_id);
        warn!("SECURITY: Admin route denied for user ID: {:?} on {}", user_id, req.uri().path());
        return AuthorizationError::AdminRequired.into_response();
    }

    next.run(req).await
}
