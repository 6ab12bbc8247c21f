use super::{auth, users};
use crate::middleware::real_ip;
use crate::repository::user_repository::DynUserRepository;
use crate::response::app_response::ErrorResponse;
use crate::service::role_cache::RoleCache;
use crate::service::token_service::TokenService;
use crate::state::auth_state::AuthState;
use crate::state::token_state::TokenState;
use crate::state::user_state::UserState;
use axum::http::{header, HeaderName, Method, Request, StatusCode};
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
use axum::{middleware, BoxError, Router};
use std::any::Any;
use std::time::Duration;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

pub fn routes(
    user_repo: DynUserRepository,
    token_service: TokenService,
    role_cache: RoleCache,
    request_timeout: Duration,
) -> Router {
    let merged_router = {
        let auth_state = AuthState::new(&user_repo, token_service.clone());
        let user_state = UserState::new(&user_repo);
        let token_state = TokenState::new(&user_repo, token_service, role_cache);

        Router::new()
            .nest("/v1/auth", auth::routes(auth_state, token_state.clone()))
            .nest("/v1/users", users::routes(user_state, token_state))
    };

    Router::new().nest("/api", merged_router).layer(
        ServiceBuilder::new()
            .layer(cors_layer())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::from_fn(real_ip::real_ip))
            .layer(TraceLayer::new_for_http().make_span_with(
                |request: &Request<axum::body::Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                },
            ))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(HandleErrorLayer::new(handle_timeout))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

/// Credentials are allowed, so the request origin is echoed back instead of `*`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            CSRF_HEADER,
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    ErrorResponse::send("Internal server error")
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

async fn handle_timeout(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        return ErrorResponse::send("Request timed out")
            .with_status(StatusCode::GATEWAY_TIMEOUT)
            .into_response();
    }

    error!("Unhandled middleware error: {}", err);
    ErrorResponse::send("Internal server error")
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}
