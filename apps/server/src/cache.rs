//! In-process response cache
//!
//! Stores successful GET responses keyed by method, path and raw query string.
//! Entries expire after a fixed TTL; the least recently used entry is evicted
//! once capacity is reached. A TTL too large to represent never expires.

use crate::config::CacheConfig;
use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A response body captured for replay.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
    expires_at: Option<Instant>,
}

/// Largest body cached unless configured otherwise.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

pub struct ResponseCache {
    entries: Mutex<LruCache<String, CachedResponse>>,
    ttl: Duration,
    max_body_bytes: usize,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.ttl()).with_max_body_bytes(config.max_body_bytes)
    }

    /// Responses with larger bodies are served but not stored.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Cache key for a request: `"{METHOD} {path}?{query}"`.
    pub fn key(method: &str, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) if !query.is_empty() => format!("{method} {path}?{query}"),
            _ => format!("{method} {path}"),
        }
    }

    /// Live entry for `key`; expired entries are dropped on access.
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        self.get_at(key, Instant::now())
    }

    pub fn put(
        &self,
        key: String,
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) {
        self.put_at(key, status, content_type, body, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<CachedResponse> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at.map_or(true, |at| at > now) => Some(entry.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    fn put_at(
        &self,
        key: String,
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
        now: Instant,
    ) {
        let entry = CachedResponse {
            status,
            content_type,
            body,
            expires_at: now.checked_add(self.ttl),
        };
        self.lock().put(key, entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, CachedResponse>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
