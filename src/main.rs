use crm_identity::config::database::{Database, DatabaseTrait};
use crm_identity::config::{logging, parameter};
use crm_identity::repository::user_repository::{DynUserRepository, UserRepository};
use crm_identity::routes;
use crm_identity::service::role_cache::RoleCache;
use crm_identity::service::token_service::{TokenService, TokenServiceTrait};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    parameter::init();
    logging::init();

    info!("Starting CRM identity service...");

    let token_service = match TokenService::new() {
        Ok(service) => service,
        Err(e) => {
            error!("Refusing to start: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    let connection = match Database::init().await {
        Ok(conn) => {
            info!("Database connection established successfully");
            Arc::new(conn)
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    let user_repo: DynUserRepository = Arc::new(UserRepository::new(&connection));
    let role_cache = RoleCache::new(parameter::get_parsed::<u64>("ROLE_CACHE_TTL_SECONDS"));
    let request_timeout = Duration::from_secs(parameter::get_parsed::<u64>("REQUEST_TIMEOUT_SECONDS"));
    let grace_period = Duration::from_secs(parameter::get_parsed::<u64>("SHUTDOWN_GRACE_SECONDS"));

    let app = routes::root::routes(user_repo, token_service, role_cache, request_timeout);

    let host = format!(
        "{}:{}",
        parameter::get("SERVER_ADDRESS"),
        parameter::get("SERVER_PORT")
    );
    let listener = match tokio::net::TcpListener::bind(&host).await {
        Ok(listener) => {
            info!("Server successfully bound to {}", host);
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", host, e);
            return Err(e.into());
        }
    };

    let shutdown_token = CancellationToken::new();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()))
    .into_future();

    // In-flight requests get `grace_period` to finish once a signal arrives.
    let drain_deadline = async {
        shutdown_token.cancelled().await;
        tokio::time::sleep(grace_period).await;
    };

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                connection.close().await;
                return Err(Box::new(e) as Box<dyn std::error::Error>);
            }
            info!("All connections drained");
        }
        _ = drain_deadline => {
            warn!("Shutdown grace period of {:?} elapsed, dropping remaining requests", grace_period);
        }
    }

    connection.close().await;
    info!("Server stopped gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM and cancels `shutdown_token`.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    shutdown_token.cancel();
}
