//! Database pool factory for the SmartTodo+ API
//!
//! Opens a pooled PostgreSQL connection from [`DatabaseConfig`], applies the
//! fixed pool policy, and verifies reachability with a single liveness probe
//! before handing the pool to the caller.

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Database pool type
pub type DbPool = Pool<Postgres>;

/// Idle connections the pool keeps warm.
///
/// sqlx has no cap on idle connections, only a floor; the floor carries the
/// same sizing intent.
pub const POOL_IDLE_CONNECTIONS: u32 = 10;

/// Upper bound on open connections.
pub const POOL_MAX_CONNECTIONS: u32 = 100;

/// Lifetime after which a pooled connection is recycled.
pub const POOL_MAX_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Open the connection pool described by `config`.
///
/// Fails without retrying when the database is unreachable; startup treats
/// that as fatal. The pool limits are fixed constants, not configurable
/// through the environment.
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    let dsn = config.dsn();

    let pool = PgPoolOptions::new()
        .min_connections(POOL_IDLE_CONNECTIONS)
        .max_connections(POOL_MAX_CONNECTIONS)
        .max_lifetime(POOL_MAX_LIFETIME)
        .connect(&dsn)
        .await
        .map_err(Error::Connection)?;

    ping(&pool).await?;
    tracing::info!("Database connection established");

    Ok(pool)
}

/// Liveness probe: one round trip confirming the pool is currently usable
pub async fn ping(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(Error::Connectivity)?;
    Ok(())
}

/// Release every pooled connection.
///
/// sqlx drains the pool and closes the handles; the operation itself cannot
/// fail.
pub async fn close(pool: &DbPool) {
    pool.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> DatabaseConfig {
        // Port 1 is never listening; the connection attempt fails fast.
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: "1".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            db_name: "smarttodo_db".to_string(),
            ssl_mode: "disable".to_string(),
        }
    }

    #[tokio::test]
    async fn connect_fails_against_an_unreachable_database() {
        let result = connect(&unreachable_config()).await;

        assert!(matches!(result, Err(Error::Connection(_))));
    }

    #[test]
    fn pool_limits_are_fixed_constants() {
        assert_eq!(POOL_IDLE_CONNECTIONS, 10);
        assert_eq!(POOL_MAX_CONNECTIONS, 100);
        assert_eq!(POOL_MAX_LIFETIME, Duration::from_secs(3600));
    }
}
