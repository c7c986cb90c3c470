//! Configuration Module
//!
//! Handles loading cache and database settings from environment
//! variables, plus validation of the identifiers that name the backing
//! table.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Defaults ==
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_TABLE_NAME: &str = "mem_cache";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 1;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// PostgreSQL truncates identifiers beyond this many bytes.
const MAX_IDENTIFIER_LENGTH: usize = 63;

// == Cache Config ==
/// Names the schema and table the cache lives in.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Target schema name
    pub schema: String,
    /// Target table name
    pub table_name: String,
}

impl CacheConfig {
    /// Creates a CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PG_CACHE_SCHEMA` - Target schema (default: "public")
    /// - `PG_CACHE_TABLE_NAME` - Target table (default: "mem_cache")
    pub fn from_env() -> Self {
        Self {
            schema: env::var("PG_CACHE_SCHEMA").unwrap_or_else(|_| DEFAULT_SCHEMA.to_string()),
            table_name: env::var("PG_CACHE_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
        }
    }

    /// Renders the validated `schema.table` pair for statement text.
    ///
    /// Both names are spliced into SQL text, so anything that is not a
    /// plain identifier is rejected rather than quoted. Runtime values
    /// (keys, payloads, timestamps) always travel as bind parameters.
    pub fn qualified_table(&self) -> Result<String> {
        validate_identifier(&self.schema, "schema")?;
        validate_identifier(&self.table_name, "table name")?;
        Ok(format!("{}.{}", self.schema, self.table_name))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

// == Db Config ==
/// Connection settings for the backing database pool.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Minimum number of idle connections kept open
    pub min_idle: u32,
    /// How long a checkout waits for a free connection
    pub connection_timeout: Duration,
}

impl DbConfig {
    /// Creates a DbConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` - PostgreSQL connection string (required to build a pool)
    /// - `DATABASE_MAX_CONNECTIONS` - Max pool size (default: 10)
    /// - `DATABASE_MIN_IDLE` - Min idle connections (default: 1)
    /// - `DATABASE_CONNECTION_TIMEOUT_SECS` - Checkout timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").unwrap_or_default(),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                .max(1),
            min_idle: env::var("DATABASE_MIN_IDLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MIN_IDLE),
            connection_timeout: env::var("DATABASE_CONNECTION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_idle: DEFAULT_MIN_IDLE,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }
}

// == Identifier Validation ==
/// Accepts plain SQL identifiers only: a letter or underscore followed
/// by letters, digits, or underscores, at most 63 bytes.
fn validate_identifier(name: &str, what: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(CacheError::InvalidConfig(format!(
            "{what} '{name}' is not a plain SQL identifier"
        )));
    }
    Ok(())
}
