//! Cache Entry Module
//!
//! Row model for a single cache entry with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{CacheError, Result};

// == Cache Entry ==
/// A single cache row as written to the backing table.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload (JSON document)
    pub value: Value,
    /// Absolute expiration instant, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry, computing `expires_at` from an optional TTL.
    ///
    /// The expiration instant is fixed at write time from the local
    /// clock; the read path compares it against the database clock.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `ttl` - Optional duration from now; None means never expires
    pub fn new(value: Value, ttl: Option<Duration>) -> Result<Self> {
        let expires_at = match ttl {
            Some(ttl) => {
                let ttl = chrono::Duration::from_std(ttl)
                    .map_err(|_| CacheError::InvalidRequest("ttl out of range".to_string()))?;
                Some(Utc::now() + ttl)
            }
            None => None,
        };

        Ok(Self { value, expires_at })
    }

    // == Liveness ==
    /// Evaluates the liveness predicate at the given instant.
    ///
    /// An entry is live iff it has no expiration or its expiration lies
    /// strictly in the future. An entry whose `expires_at` equals the
    /// evaluation instant is already stale.
    pub fn is_live(&self, at: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => expires > at,
            None => true,
        }
    }

    // == Is Expired ==
    /// Checks liveness against the current local clock.
    pub fn is_expired(&self) -> bool {
        !self.is_live(Utc::now())
    }
}
