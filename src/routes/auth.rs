use crate::handler::{auth_handler, refresh_handler};
use crate::middleware::auth as auth_middleware;
use crate::state::auth_state::AuthState;
use crate::state::token_state::TokenState;
use axum::{middleware, routing::post, Router};

pub fn routes(auth_state: AuthState, token_state: TokenState) -> Router {
    let public = Router::<AuthState>::new()
        .route("/login", post(auth_handler::login))
        .route("/refresh-token", post(refresh_handler::refresh_token))
        .route("/forgot-password", post(auth_handler::forgot_password))
        .route("/reset-password", post(auth_handler::reset_password))
        .with_state(auth_state);

    let authenticated = Router::new()
        .route("/logout", post(auth_handler::logout))
        .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::auth));

    public.merge(authenticated)
}
