//! Schema Provisioner Module
//!
//! Ensures the backing cache table exists before any store operation.

use tracing::info;

use crate::config::CacheConfig;
use crate::db::PgPool;
use crate::error::Result;

// == Statement Rendering ==
/// Renders the idempotent create-table statement.
fn create_table_sql(config: &CacheConfig) -> Result<String> {
    let table = config.qualified_table()?;
    Ok(format!(
        "CREATE UNLOGGED TABLE IF NOT EXISTS {table} (\
         key TEXT PRIMARY KEY, \
         value JSONB, \
         ttl TIMESTAMPTZ)"
    ))
}

// == Ensure Table ==
/// Guarantees the cache table exists.
///
/// Idempotent: running it against an already-provisioned table changes
/// nothing and loses no data. The table is UNLOGGED — cache contents
/// are reconstructible, so skipping WAL is an acceptable trade for
/// write throughput, and rows may be lost on an unclean shutdown.
///
/// Any database error (insufficient privileges, connectivity) surfaces
/// unchanged; there is no retry. Callers should treat a failure here as
/// fatal to startup.
pub fn ensure_table(pool: &PgPool, config: &CacheConfig) -> Result<()> {
    let table = config.qualified_table()?;
    let sql = create_table_sql(config)?;

    info!(%table, "initializing cache table");
    let mut conn = pool.get()?;
    conn.batch_execute(&sql)?;
    Ok(())
}
