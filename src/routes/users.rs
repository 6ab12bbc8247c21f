use crate::handler::{profile_handler, user_handler};
use crate::middleware::{auth as auth_middleware, authorization};
use crate::state::token_state::TokenState;
use crate::state::user_state::UserState;
use axum::routing::get;
use axum::{middleware, Router};

pub fn routes(user_state: UserState, token_state: TokenState) -> Router {
    let admin = Router::<UserState>::new()
        .route(
            "/",
            get(user_handler::list_users)
                .post(user_handler::create_user)
                .delete(user_handler::delete_users),
        )
        .route(
            "/{id}",
            get(user_handler::get_user).patch(user_handler::update_user),
        )
        .route_layer(middleware::from_fn(authorization::require_admin));

    // The auth layer is added last so it runs before the admin gate.
    Router::<UserState>::new()
        .route(
            "/me",
            get(profile_handler::get_me).patch(profile_handler::update_me),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::auth))
        .with_state(user_state)
}
