use crate::error::Result;
use crate::readers::Dataset;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

// one year
const MAX_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub url1: String,
    pub url2: String,
}

impl CacheKey {
    pub fn new(url1: &str, url2: &str) -> Self {
        Self {
            url1: url1.to_string(),
            url2: url2.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Arc<Dataset>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Loaded datasets keyed on the two partition locations, each valid for one TTL window
#[derive(Debug)]
pub struct DatasetCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl DatasetCache {
    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs)
            .unwrap_or(MAX_TTL_SECS)
            .min(MAX_TTL_SECS);
        Self {
            ttl: Duration::seconds(ttl_secs),
            entries: HashMap::new(),
        }
    }

    /// The cached dataset if it is still inside its window
    pub fn get(&self, url1: &str, url2: &str, now: DateTime<Utc>) -> Option<Arc<Dataset>> {
        self.entries
            .get(&CacheKey::new(url1, url2))
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| Arc::clone(&entry.value))
    }

    pub fn expires_at(&self, url1: &str, url2: &str) -> Option<DateTime<Utc>> {
        self.entries
            .get(&CacheKey::new(url1, url2))
            .map(|entry| entry.expires_at)
    }

    /// Return the fresh entry or run `load` and store its result; failures are not cached
    pub fn get_or_load<F>(
        &mut self,
        url1: &str,
        url2: &str,
        now: DateTime<Utc>,
        load: F,
    ) -> Result<Arc<Dataset>>
    where
        F: FnOnce(&str, &str) -> Result<Dataset>,
    {
        if let Some(dataset) = self.get(url1, url2, now) {
            debug!("Cache hit for ({}, {})", url1, url2);
            return Ok(dataset);
        }

        self.entries.retain(|_, entry| entry.is_fresh(now));

        let dataset = Arc::new(load(url1, url2)?);
        let expires_at = now + self.ttl;
        info!(
            "Cached {} charger rows until {}",
            dataset.len(),
            expires_at.format("%H:%M:%S")
        );

        self.entries.insert(
            CacheKey::new(url1, url2),
            CacheEntry {
                value: Arc::clone(&dataset),
                expires_at,
            },
        );

        Ok(dataset)
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocatorError;
    use std::cell::Cell;

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_reuse_within_window() {
        let mut cache = DatasetCache::new(600);
        let loads = Cell::new(0);
        let load = |_: &str, _: &str| -> Result<Dataset> {
            loads.set(loads.get() + 1);
            Ok(Dataset::empty())
        };

        let first = cache.get_or_load("a", "b", start(), load).unwrap();
        let second = cache
            .get_or_load("a", "b", start() + Duration::seconds(599), load)
            .unwrap();

        assert_eq!(loads.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.expires_at("a", "b"),
            Some(start() + Duration::seconds(600))
        );
    }

    #[test]
    fn test_reload_after_expiry() {
        let mut cache = DatasetCache::new(600);
        let loads = Cell::new(0);
        let load = |_: &str, _: &str| -> Result<Dataset> {
            loads.set(loads.get() + 1);
            Ok(Dataset::empty())
        };

        cache.get_or_load("a", "b", start(), load).unwrap();
        assert!(cache.get("a", "b", start() + Duration::seconds(600)).is_none());
        cache
            .get_or_load("a", "b", start() + Duration::seconds(600), load)
            .unwrap();

        assert_eq!(loads.get(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_separate() {
        let mut cache = DatasetCache::new(600);
        cache
            .get_or_load("a", "b", start(), |_, _| Ok(Dataset::empty()))
            .unwrap();

        assert!(cache.get("a", "b", start()).is_some());
        assert!(cache.get("b", "a", start()).is_none());
    }

    #[test]
    fn test_failures_are_not_cached() {
        let mut cache = DatasetCache::new(600);
        let result = cache.get_or_load("a", "b", start(), |_, _| {
            Err(LocatorError::MissingColumn {
                column: "주소".to_string(),
            })
        });

        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate() {
        let mut cache = DatasetCache::new(600);
        cache
            .get_or_load("a", "b", start(), |_, _| Ok(Dataset::empty()))
            .unwrap();
        cache.invalidate();
        assert!(cache.get("a", "b", start()).is_none());
    }
}
