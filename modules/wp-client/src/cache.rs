//! Short-TTL in-memory response cache.
//!
//! Key is the fully-qualified request URL, value the decoded JSON.
//! Writes are last-writer-wins; staleness is bounded by the TTL window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    expires_at: Instant,
    value: Value,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, url: &str) -> Option<Value> {
        let entries = self.entries.lock().expect("response cache lock poisoned");
        let entry = entries.get(url)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn put(&self, url: &str, value: Value) {
        let mut entries = self.entries.lock().expect("response cache lock poisoned");
        // Expired entries are evicted on write so the map stays bounded
        // by the working set of the last TTL window.
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            url.to_string(),
            CacheEntry {
                expires_at: now + self.ttl,
                value,
            },
        );
    }
}
