//! Process-wide PostgreSQL connection pool
//!
//! The pool is built once at startup from [`DatabaseConfig`], handed to
//! repositories by value (a `PgPool` is a cheap handle), and drained once at
//! shutdown with [`Database::close`].

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect and verify that at least one connection can be opened
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = pool_options(config).connect(&config.url).await?;

        info!(
            max_connections = config.max_connections,
            acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
            "Database pool established"
        );

        Ok(Self { pool })
    }

    /// Build the pool without opening any connection until first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = pool_options(config).connect_lazy(&config.url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Clone the pool handle for a repository
    pub fn pool_handle(&self) -> PgPool {
        self.pool.clone()
    }

    /// Close every pooled connection; waits for checked-out connections to return
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
}
