//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A missing or expired key is not an error: read operations return
/// `Ok(None)` for both. Every variant here aborts the calling operation
/// and propagates unchanged to the caller.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Statement execution failed in the backing database
    #[error("storage error: {0}")]
    Storage(#[from] postgres::Error),

    /// Checking a connection out of the pool failed
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A typed value could not be encoded to JSON; nothing was written
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialization {
        /// Key the write was intended for
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored payload could not be decoded into the requested type
    #[error("failed to deserialize value for key '{key}': {source}")]
    Deserialization {
        /// Key whose payload failed to decode
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid operation input (empty key, out-of-range TTL)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration (malformed identifier, missing URL)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_message_names_key() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = CacheError::Serialization {
            key: "user:1".to_string(),
            source,
        };
        assert!(err.to_string().contains("user:1"));
        assert!(err.to_string().starts_with("failed to serialize"));
    }

    #[test]
    fn test_deserialization_error_message_names_key() {
        let source = serde_json::from_str::<u32>("{}").unwrap_err();
        let err = CacheError::Deserialization {
            key: "user:2".to_string(),
            source,
        };
        assert!(err.to_string().contains("user:2"));
        assert!(err.to_string().starts_with("failed to deserialize"));
    }

    #[test]
    fn test_invalid_request_message() {
        let err = CacheError::InvalidRequest("key cannot be empty".to_string());
        assert_eq!(err.to_string(), "invalid request: key cannot be empty");
    }

    #[test]
    fn test_error_source_chain_preserved() {
        use std::error::Error as _;

        let source = serde_json::from_str::<u32>("{}").unwrap_err();
        let err = CacheError::Deserialization {
            key: "k".to_string(),
            source,
        };
        assert!(err.source().is_some());
    }
}
