use crate::domain::ports::TextCache;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-process `TextCache`. Expired entries are dropped when read and swept on every `set`.
#[derive(Debug, Default)]
pub struct MemoryTextCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryTextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            retain_live(&mut entries);
        }
    }
}

impl TextCache for MemoryTextCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        let expired = match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => {
                return Some(value.clone())
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            retain_live(&mut entries);
            entries.insert(key.to_string(), (value, Instant::now() + ttl));
        }
    }
}

fn retain_live(entries: &mut HashMap<String, (String, Instant)>) {
    let now = Instant::now();
    entries.retain(|_, (_, expires_at)| *expires_at > now);
}

/// Cache that stores nothing, for callers that want fresh text every time.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl TextCache for NoCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let cache = MemoryTextCache::new();
        assert!(cache.get("a").is_none());
        cache.set("a", "alpha".to_string(), Duration::from_secs(60));
        assert_eq!(cache.get("a").as_deref(), Some("alpha"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = MemoryTextCache::new();
        cache.set("a", "alpha".to_string(), Duration::ZERO);
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_sweeps_expired_entries() {
        let cache = MemoryTextCache::new();
        cache.set("stale", "x".to_string(), Duration::ZERO);
        cache.set("fresh", "y".to_string(), Duration::from_secs(60));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh").as_deref(), Some("y"));
    }

    #[test]
    fn test_purge_expired() {
        let cache = MemoryTextCache::new();
        cache.set("new", "y".to_string(), Duration::from_secs(60));
        cache.set("old", "x".to_string(), Duration::ZERO);
        assert_eq!(cache.len(), 2);
        cache.purge_expired();
        assert_eq!(cache.len(), 1);
        assert!(NoCache.get("new").is_none());
    }
}
