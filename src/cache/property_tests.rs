//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the pure, database-free parts: the liveness
//! predicate, TTL arithmetic, the serialization boundary, and
//! identifier validation. Properties that need live storage are in the
//! integration suite.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::cache::CacheEntry;
use crate::config::CacheConfig;

// == Strategies ==
/// Generates plain SQL identifiers (valid schema/table names)
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,62}".prop_map(|s| s)
}

/// Generates identifiers carrying one character SQL would choke on
fn tainted_identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_]{1,8}[ ;'\"%()-][a-zA-Z_]{0,8}".prop_map(|s| s)
}

/// Generates evaluation instants spread over several decades
fn instant_strategy() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    (0i64..2_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// A representative typed payload for round-trip checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    id: u64,
    name: String,
    tags: Vec<String>,
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        any::<u64>(),
        "[a-zA-Z0-9 ]{0,32}",
        prop::collection::vec("[a-z]{1,8}", 0..5),
    )
        .prop_map(|(id, name, tags)| Profile { id, name, tags })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An entry without an expiration is live at every instant.
    #[test]
    fn prop_no_ttl_is_live_at_any_instant(at in instant_strategy()) {
        let entry = CacheEntry {
            value: json!("v"),
            expires_at: None,
        };
        prop_assert!(entry.is_live(at), "entry without ttl must never expire");
    }

    // Liveness is strict: live strictly before the expiration instant,
    // stale at and after it.
    #[test]
    fn prop_liveness_is_strictly_before_expiry(
        expires in instant_strategy(),
        offset_secs in 1i64..86_400
    ) {
        let entry = CacheEntry {
            value: json!("v"),
            expires_at: Some(expires),
        };

        let offset = chrono::Duration::seconds(offset_secs);
        prop_assert!(entry.is_live(expires - offset), "must be live before expiry");
        prop_assert!(!entry.is_live(expires), "must be stale at the expiry instant");
        prop_assert!(!entry.is_live(expires + offset), "must be stale after expiry");
    }

    // A positive TTL always yields an expiration in the future of the
    // write instant.
    #[test]
    fn prop_ttl_yields_future_expiration(ttl_secs in 1u64..86_400) {
        let before = Utc::now();
        let entry = CacheEntry::new(json!("v"), Some(Duration::from_secs(ttl_secs))).unwrap();

        let expires = entry.expires_at.expect("ttl must set an expiration");
        prop_assert!(expires > before, "expiration must lie in the future");
        prop_assert!(!entry.is_expired());
    }

    // The serialization boundary is lossless for encodable values:
    // encode-to-document then decode returns the original.
    #[test]
    fn prop_payload_round_trip(profile in profile_strategy()) {
        let encoded = serde_json::to_value(&profile).unwrap();
        let decoded: Profile = serde_json::from_value(encoded).unwrap();
        prop_assert_eq!(decoded, profile, "round-trip must preserve the value");
    }

    // Every plain identifier pair renders to exactly "schema.table".
    #[test]
    fn prop_valid_identifiers_render(
        schema in identifier_strategy(),
        table in identifier_strategy()
    ) {
        let config = CacheConfig {
            schema: schema.clone(),
            table_name: table.clone(),
        };
        prop_assert_eq!(
            config.qualified_table().unwrap(),
            format!("{}.{}", schema, table)
        );
    }

    // An identifier containing any non-identifier character is rejected
    // before statement text exists.
    #[test]
    fn prop_tainted_identifiers_rejected(table in tainted_identifier_strategy()) {
        let config = CacheConfig {
            schema: "public".to_string(),
            table_name: table,
        };
        prop_assert!(config.qualified_table().is_err());
    }
}
