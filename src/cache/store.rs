//! Cache Store Module
//!
//! Typed, expiry-aware key-value access over the backing PostgreSQL
//! table.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::{schema, CacheEntry};
use crate::config::{CacheConfig, DbConfig};
use crate::db::{self, PgPool};
use crate::error::{CacheError, Result};

// == Statements ==
/// Statement texts rendered once at construction.
///
/// The schema and table identifiers are validated before being spliced
/// into the text; every runtime value travels as a bind parameter.
#[derive(Debug, Clone)]
struct Statements {
    upsert: String,
    select: String,
    delete: String,
    purge: String,
}

impl Statements {
    fn render(config: &CacheConfig) -> Result<Self> {
        let table = config.qualified_table()?;

        Ok(Self {
            upsert: format!(
                "INSERT INTO {table} (key, value, ttl) VALUES ($1, $2, $3) \
                 ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, ttl = EXCLUDED.ttl"
            ),
            select: format!(
                "SELECT value FROM {table} WHERE key = $1 AND (ttl IS NULL OR ttl > now())"
            ),
            delete: format!("DELETE FROM {table} WHERE key = $1"),
            purge: format!("DELETE FROM {table} WHERE ttl IS NOT NULL AND ttl <= now()"),
        })
    }
}

// == Cache Store ==
/// Key-value store over a PostgreSQL table, with per-entry TTL.
///
/// The store is stateless: every operation is a single synchronous
/// round trip on a pooled connection, and atomicity is delegated to
/// statement-level guarantees of the database. Concurrent writers to
/// the same key never produce a row with a mismatched value/ttl pair;
/// the last committer wins. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct CacheStore {
    pool: PgPool,
    stmts: Statements,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store over an existing pool.
    ///
    /// Validates the schema and table identifiers and renders the
    /// statement texts; does not touch the database. The table itself
    /// must already exist — call [`ensure_table`](crate::cache::ensure_table)
    /// first, or use [`CacheStore::connect`], which does both.
    pub fn new(pool: PgPool, config: &CacheConfig) -> Result<Self> {
        let stmts = Statements::render(config)?;
        Ok(Self { pool, stmts })
    }

    // == Connect ==
    /// Builds a pool, provisions the table, and returns a ready store.
    pub fn connect(db: &DbConfig, config: &CacheConfig) -> Result<Self> {
        let pool = db::build_pool(db)?;
        schema::ensure_table(&pool, config)?;
        Self::new(pool, config)
    }

    // == Set ==
    /// Stores a pre-encoded payload under `key` with an optional TTL.
    ///
    /// Computes the expiration instant up front, then performs a single
    /// atomic upsert: a new key inserts a row, an existing key has both
    /// its payload and expiration replaced together — never one without
    /// the other. Passing `None` for `ttl` stores an entry that never
    /// expires.
    ///
    /// # Arguments
    /// * `key` - Non-empty cache key
    /// * `value` - Payload, already in its JSON document form
    /// * `ttl` - Optional duration from now
    pub fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest(
                "key cannot be empty".to_string(),
            ));
        }

        let entry = CacheEntry::new(value, ttl)?;

        let mut conn = self.pool.get()?;
        conn.execute(
            self.stmts.upsert.as_str(),
            &[&key, &entry.value, &entry.expires_at],
        )?;

        debug!(key, "cache set");
        Ok(())
    }

    // == Put ==
    /// Serializes a typed value to JSON, then stores it via [`set`](Self::set).
    ///
    /// A value that cannot be encoded fails with
    /// [`CacheError::Serialization`] before any write is attempted, so
    /// a prior row for the key is left untouched.
    pub fn put<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()> {
        let json = serde_json::to_value(value).map_err(|source| CacheError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.set(key, json, ttl)
    }

    // == Get ==
    /// Retrieves the payload for `key`, filtered by liveness.
    ///
    /// The liveness predicate (`ttl IS NULL OR ttl > now()`) runs
    /// inside the read statement, so validity is decided against the
    /// database clock at read time. Returns `Ok(None)` when the key was
    /// never set, was deleted, or has expired — the three cases are
    /// indistinguishable on purpose.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.pool.get()?;
        let row = conn.query_opt(self.stmts.select.as_str(), &[&key])?;

        match row {
            Some(row) => {
                debug!(key, "cache hit");
                Ok(Some(row.try_get(0)?))
            }
            None => {
                debug!(key, "cache miss");
                Ok(None)
            }
        }
    }

    // == Get As ==
    /// Retrieves the payload for `key` and decodes it into `T`.
    ///
    /// A payload that exists but cannot be decoded into the requested
    /// shape is a [`CacheError::Deserialization`], not a miss: the data
    /// is there, the caller asked for the wrong type.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(json) => {
                let value =
                    serde_json::from_value(json).map_err(|source| CacheError::Deserialization {
                        key: key.to_string(),
                        source,
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Delete ==
    /// Removes the row for `key`. Deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.pool.get()?;
        let removed = conn.execute(self.stmts.delete.as_str(), &[&key])?;
        debug!(key, removed, "cache delete");
        Ok(())
    }

    // == Purge Expired ==
    /// Deletes all stale rows and returns how many were removed.
    ///
    /// Stale rows are invisible to reads but occupy storage until
    /// overwritten or deleted. The store never schedules this call;
    /// callers that care about reclamation run it on their own cadence.
    pub fn purge_expired(&self) -> Result<u64> {
        let mut conn = self.pool.get()?;
        let removed = conn.execute(self.stmts.purge.as_str(), &[])?;
        debug!(removed, "purged expired cache entries");
        Ok(removed)
    }
}
