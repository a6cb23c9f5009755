// src/github/cache.rs
// =============================================================================
// Short-lived memoization of API responses.
//
// Two identical requests made within the TTL share one response. Entries are
// never written to disk and are replaced lazily: an expired entry is simply
// treated as a miss and overwritten by the next insert.
// =============================================================================

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub struct ResponseCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(key, (Instant::now(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert(("octocat", 1), "page one".to_string()).await;

        assert_eq!(cache.get(&("octocat", 1)).await.as_deref(), Some("page one"));
        assert_eq!(cache.get(&("octocat", 2)).await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("key", 42).await;

        assert_eq!(cache.get(&"key").await, None);
    }
}
