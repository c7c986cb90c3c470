//! Postgres Mem Cache - a key-value cache backed by a PostgreSQL table
//!
//! Provides cache semantics (set with expiration, get with implicit
//! expiry filtering, delete) for applications that already operate
//! Postgres and do not want a separate caching service. Expiry is
//! evaluated inside the read path; stale rows persist until overwritten,
//! deleted, or reclaimed with [`CacheStore::purge_expired`].
//!
//! ```no_run
//! use pg_mem_cache::{CacheConfig, CacheStore, DbConfig};
//! use std::time::Duration;
//!
//! # fn main() -> pg_mem_cache::Result<()> {
//! let store = CacheStore::connect(&DbConfig::from_env(), &CacheConfig::default())?;
//!
//! store.put("user:123", &"alice", Some(Duration::from_secs(300)))?;
//! let name: Option<String> = store.get_as("user:123")?;
//! store.delete("user:123")?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod db;
pub mod error;

pub use cache::{ensure_table, CacheEntry, CacheStore};
pub use config::{CacheConfig, DbConfig};
pub use db::PgPool;
pub use error::{CacheError, Result};
