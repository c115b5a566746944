//! Request-level cache with per-resource TTLs
//!
//! An in-memory associative store mapping a canonical request key to a cached
//! JSON payload with its write and expiry instants. Expiry is lazy: an
//! expired entry is treated as absent on read rather than actively purged.
//!
//! Keys are canonicalized (query pairs sorted, stable serialization) so that
//! two logically identical requests map to the same cache slot regardless of
//! the order the caller supplied the parameters in.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};
use url::form_urlencoded;

/// Canonical identifier for one logical upstream request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    path: String,
    query: String,
}

impl CacheKey {
    /// Build a key from an endpoint path and its query pairs
    ///
    /// Pairs are sorted by key then value, then percent-encoded, so parameter
    /// order never produces distinct keys for the same logical request and a
    /// separator character inside a value never merges two distinct requests
    /// into one key.
    pub fn new(path: &str, pairs: &[(String, String)]) -> Self {
        let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
        sorted.sort();
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (k, v) in sorted {
            query.append_pair(k, v);
        }
        Self {
            path: path.to_string(),
            query: query.finish(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// One cached payload with its lifetime bookkeeping
///
/// Entries are immutable once written; an update is always a full
/// replacement under the same key.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    written_at: Instant,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: serde_json::Value, ttl: Duration) -> Self {
        let written_at = Instant::now();
        Self {
            value,
            written_at,
            expires_at: written_at + ttl,
        }
    }

    /// An entry is valid iff now is strictly before its expiry instant
    fn is_valid(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache store shared by the sync scheduler and on-demand fetches
///
/// Reads and writes are linearizable: a reader sees either the old or the
/// new entry for a key, never a partial write.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl CacheStore {
    /// Create an empty cache store
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for a key if present and not expired
    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_valid(Instant::now()) {
            debug!(key = %key, age_ms = entry.written_at.elapsed().as_millis() as u64, "cache hit");
            Some(entry.value.clone())
        } else {
            debug!(key = %key, "cache entry expired");
            None
        }
    }

    /// Insert or replace the entry for a key with `expires_at = now + ttl`
    pub async fn put(&self, key: CacheKey, value: serde_json::Value, ttl: Duration) {
        let mut entries = self.entries.write().await;
        let entry = CacheEntry::new(value, ttl);
        debug!(key = %key, ttl_secs = ttl.as_secs(), "cache write");
        entries.insert(key, entry);
    }

    /// Remove all entries (administrative operation)
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        info!("Cleared integration cache ({} entries)", removed);
    }

    /// Number of stored entries, including ones that have expired but not
    /// been superseded yet
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_canonicalization_ignores_pair_order() {
        let a = CacheKey::new(
            "/events",
            &pairs(&[("category", "cultura"), ("status", "upcoming")]),
        );
        let b = CacheKey::new(
            "/events",
            &pairs(&[("status", "upcoming"), ("category", "cultura")]),
        );
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "/events?category=cultura&status=upcoming");
    }

    #[test]
    fn test_distinct_params_produce_distinct_keys() {
        let a = CacheKey::new("/events", &pairs(&[("category", "cultura")]));
        let b = CacheKey::new("/events", &pairs(&[("category", "gastronomia")]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_without_query() {
        let key = CacheKey::new("/destinations", &[]);
        assert_eq!(key.to_string(), "/destinations");
    }

    #[tokio::test]
    async fn test_separator_characters_in_values_do_not_collide() {
        // A value containing "&" or "=" must not serialize to the same key
        // as the pair set it would merge into
        let smuggled = CacheKey::new("/destinations", &pairs(&[("category", "eco&city=Bonito")]));
        let split = CacheKey::new(
            "/destinations",
            &pairs(&[("category", "eco"), ("city", "Bonito")]),
        );
        assert_ne!(smuggled, split);

        let store = CacheStore::new();
        store
            .put(smuggled, json!({"which": "smuggled"}), Duration::from_secs(60))
            .await;
        assert_eq!(store.get(&split).await, None);
    }

    #[tokio::test]
    async fn test_get_returns_value_before_expiry() {
        let store = CacheStore::new();
        let key = CacheKey::new("/destinations", &[]);
        store
            .put(key.clone(), json!({"ok": true}), Duration::from_secs(60))
            .await;

        assert_eq!(store.get(&key).await, Some(json!({"ok": true})));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_treated_as_absent() {
        let store = CacheStore::new();
        let key = CacheKey::new("/bookings", &[]);
        store
            .put(key.clone(), json!([1, 2, 3]), Duration::from_millis(20))
            .await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.get(&key).await, None);
        // Lazy expiry: the entry is still in the map until superseded
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_entry() {
        let store = CacheStore::new();
        let key = CacheKey::new("/analytics", &pairs(&[("period", "30d")]));
        store
            .put(key.clone(), json!({"v": 1}), Duration::from_secs(60))
            .await;
        store
            .put(key.clone(), json!({"v": 2}), Duration::from_secs(60))
            .await;

        assert_eq!(store.get(&key).await, Some(json!({"v": 2})));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = CacheStore::new();
        store
            .put(
                CacheKey::new("/a", &[]),
                json!(1),
                Duration::from_secs(60),
            )
            .await;
        store
            .put(
                CacheKey::new("/b", &[]),
                json!(2),
                Duration::from_secs(60),
            )
            .await;
        assert_eq!(store.len().await, 2);

        store.clear().await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_readers_and_writer() {
        use std::sync::Arc;

        let store = Arc::new(CacheStore::new());
        let key = CacheKey::new("/destinations", &[]);
        store
            .put(key.clone(), json!({"v": 0}), Duration::from_secs(60))
            .await;

        let mut handles = Vec::new();
        for i in 0..8u32 {
            let store = Arc::clone(&store);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    store.put(key, json!({ "v": i }), Duration::from_secs(60)).await;
                } else {
                    // A reader must observe a complete entry or none
                    let value = store.get(&key).await.unwrap();
                    assert!(value.get("v").is_some());
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 1);
    }
}
