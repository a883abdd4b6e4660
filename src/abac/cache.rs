//! LRU cache of compiled regex patterns
//!
//! Policies are evaluated far more often than they change, so `regex_match`
//! conditions and regex resource patterns are compiled once and reused.
//! Malformed patterns are cached too, as permanent non-matches.

use super::pattern::{regex_match, RegexMatcher};
use lru::LruCache;
use parking_lot::Mutex;
use regex::Regex;
use std::num::NonZeroUsize;
use tracing::warn;

/// Thread-safe LRU cache for compiled patterns
pub struct RegexCache {
    /// `None` when caching is disabled
    cache: Option<Mutex<LruCache<String, Option<Regex>>>>,
}

impl RegexCache {
    /// Create a cache holding up to `capacity` patterns; 0 disables caching
    pub fn new(capacity: usize) -> Self {
        RegexCache {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Compiled pattern, or `None` if it does not parse
    fn compiled(&self, pattern: &str) -> Option<Regex> {
        let cache = self.cache.as_ref()?;

        if let Some(entry) = cache.lock().get(pattern) {
            return entry.clone();
        }

        let compiled = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!("Ignoring malformed regex pattern {:?}: {}", pattern, err);
                None
            }
        };
        cache.lock().put(pattern.to_string(), compiled.clone());
        compiled
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cache
            .as_ref()
            .map_or(0, |cache| cache.lock().cap().get())
    }
}

impl RegexMatcher for RegexCache {
    fn is_match(&self, pattern: &str, subject: &str) -> bool {
        if self.cache.is_none() {
            return regex_match(pattern, subject);
        }
        self.compiled(pattern)
            .is_some_and(|re| re.is_match(subject))
    }
}

impl std::fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
