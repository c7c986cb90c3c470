//! Database Pool Module
//!
//! Builds the r2d2 connection pool the cache store checks its
//! connections out of. Timeout and retry policy live entirely here and
//! in the database client; the store itself never retries.

use r2d2::Pool;
use r2d2_postgres::{postgres::NoTls, PostgresConnectionManager};
use tracing::debug;

use crate::config::DbConfig;
use crate::error::{CacheError, Result};

/// Pooled PostgreSQL connection handle shared by all cache operations.
pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

// == Pool Construction ==
/// Builds a connection pool from the given settings.
///
/// Establishes the minimum idle connections eagerly, so an unreachable
/// or misconfigured database fails here rather than on first use.
pub fn build_pool(config: &DbConfig) -> Result<PgPool> {
    if config.url.is_empty() {
        return Err(CacheError::InvalidConfig(
            "database URL is empty (set DATABASE_URL)".to_string(),
        ));
    }

    let manager = PostgresConnectionManager::new(
        config
            .url
            .parse()
            .map_err(|e| CacheError::InvalidConfig(format!("invalid database URL: {e}")))?,
        NoTls,
    );

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_idle))
        .connection_timeout(config.connection_timeout)
        .build(manager)?;

    debug!(
        max_connections = config.max_connections,
        min_idle = config.min_idle,
        "database pool ready"
    );
    Ok(pool)
}
