//! In-process cache provider.
//!
//! Entries are kept as encoded NPY bytes, so loads go through the same codec
//! path as the disk provider. Nothing survives the process.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cache::traits::{CacheError, CacheKey, PrimeCache};
use crate::npy;
use crate::prime_set::PrimeSet;

/// Prime set cache held in memory.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, Vec<u8>>>,
}

impl MemoryCache {
    /// Create an empty memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Total encoded size of all entries in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.entries
            .read()
            .values()
            .map(|bytes| bytes.len() as u64)
            .sum()
    }

    /// Replace the raw bytes stored under `key`.
    ///
    /// Useful for exercising corrupt-entry handling.
    pub fn insert_raw(&self, key: &CacheKey, bytes: Vec<u8>) {
        self.entries.write().insert(key.clone(), bytes);
    }
}

impl PrimeCache for MemoryCache {
    fn exists(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.entries.read().contains_key(key))
    }

    fn load(&self, key: &CacheKey) -> Result<PrimeSet, CacheError> {
        let entries = self.entries.read();
        let bytes = entries
            .get(key)
            .ok_or_else(|| CacheError::Missing(key.to_string()))?;

        let values = npy::decode(bytes).map_err(|source| CacheError::Codec {
            path: key.as_str().into(),
            source,
        })?;

        Ok(PrimeSet::from(values))
    }

    fn store(&self, key: &CacheKey, primes: &PrimeSet) -> Result<(), CacheError> {
        let bytes = npy::encode(primes.as_slice());
        self.entries.write().insert(key.clone(), bytes);
        Ok(())
    }

    fn remove(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::RangeConfig;

    fn key() -> CacheKey {
        CacheKey::from_range(&RangeConfig::default())
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = MemoryCache::new();
        assert_eq!(cache.entry_count(), 0);
        assert_eq!(cache.size_bytes(), 0);
        assert!(!cache.exists(&key()).unwrap());
    }

    #[test]
    fn test_store_load_remove() {
        let cache = MemoryCache::new();
        let primes = PrimeSet::from(vec![10007, 10009]);

        cache.store(&key(), &primes).unwrap();
        assert_eq!(cache.entry_count(), 1);
        assert!(cache.size_bytes() > 0);
        assert_eq!(cache.load(&key()).unwrap(), primes);

        assert!(cache.remove(&key()).unwrap());
        assert!(!cache.remove(&key()).unwrap());
    }

    #[test]
    fn test_load_missing() {
        let cache = MemoryCache::new();
        assert!(matches!(
            cache.load(&key()),
            Err(CacheError::Missing(_))
        ));
    }

    #[test]
    fn test_load_corrupt_entry() {
        let cache = MemoryCache::new();
        cache.insert_raw(&key(), vec![0, 1, 2]);
        assert!(matches!(cache.load(&key()), Err(CacheError::Codec { .. })));
    }
}
