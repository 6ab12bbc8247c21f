use crate::config::parameter;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Error, Pool, Postgres};
use std::str::FromStr;
use tracing::info;

pub struct Database {
    pool: Pool<Postgres>,
}

#[async_trait]
pub trait DatabaseTrait {
    async fn init() -> Result<Self, Error>
        where
            Self: Sized;
    fn get_pool(&self) -> &Pool<Postgres>;
    async fn close(&self);
}

#[async_trait]
impl DatabaseTrait for Database {
    async fn init() -> Result<Self, Error> {
        let ssl_mode = PgSslMode::from_str(&parameter::get("DB_SSL_MODE"))?;
        let port = parameter::get("DB_PORT")
            .parse::<u16>()
            .map_err(|e| Error::Configuration(e.into()))?;

        let options = PgConnectOptions::new()
            .host(&parameter::get("DB_HOST"))
            .port(port)
            .username(&parameter::get("DB_USER"))
            .password(&parameter::get("DB_PASSWORD"))
            .database(&parameter::get("DB_NAME"))
            .ssl_mode(ssl_mode);

        let max_connections = parameter::get_parsed::<u32>("DB_MAX_CONNECTIONS");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        // Fail fast when the server is unreachable rather than on the first request
        sqlx::query("SELECT 1").execute(&pool).await?;

        let is_development = cfg!(debug_assertions) ||
            parameter::get_optional("ENV")
                .map(|env| env == "development")
                .unwrap_or(false);
        if is_development {
            info!("Database pool configured: max_connections={}", max_connections);
        } else {
            info!("Database pool configured successfully");
        }

        Ok(Self { pool })
    }

    fn get_pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
