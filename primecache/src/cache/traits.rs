//! Core traits for the prime set cache.
//!
//! The `PrimeCache` trait is the explicit memoization interface used by the
//! driver. Keys are derived from the range parameters, so changing the range
//! never collides with a previously cached result.
//!
//! # Example
//!
//! ```
//! use primecache::cache::{CacheKey, MemoryCache, PrimeCache};
//! use primecache::{PrimeSet, RangeConfig};
//!
//! let cache = MemoryCache::new();
//! let key = CacheKey::from_range(&RangeConfig::default());
//!
//! assert!(!cache.exists(&key)?);
//! cache.store(&key, &PrimeSet::from(vec![10007, 10009]))?;
//! assert_eq!(cache.load(&key)?.len(), 2);
//! # Ok::<(), primecache::cache::CacheError>(())
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::npy::NpyError;
use crate::prime_set::PrimeSet;
use crate::range::RangeConfig;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error reading or writing an artifact.
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The artifact exists but is not a valid NPY integer array.
    #[error("Corrupt cache artifact {}: {source}", path.display())]
    Codec { path: PathBuf, source: NpyError },

    /// No entry is stored under the key.
    #[error("No cached prime set for key '{0}'")]
    Missing(String),
}

/// Identifies one cached prime set.
///
/// Rendered as `primes_s{start}_l{length}_st{step}_o{offset}`, which doubles
/// as the artifact file stem for disk caches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a range.
    pub fn from_range(range: &RangeConfig) -> Self {
        Self(format!(
            "primes_s{}_l{}_st{}_o{}",
            range.start, range.length, range.step, range.offset
        ))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Memoization interface for computed prime sets.
///
/// Implementations store the set exactly: a `load` after `store` under the
/// same key yields the same values in the same order.
pub trait PrimeCache {
    /// Check whether a set is stored under `key`.
    fn exists(&self, key: &CacheKey) -> Result<bool, CacheError>;

    /// Load the set stored under `key`.
    ///
    /// # Errors
    ///
    /// Fails if the entry is missing, unreadable or corrupt. There is no
    /// fallback to recomputation.
    fn load(&self, key: &CacheKey) -> Result<PrimeSet, CacheError>;

    /// Store `primes` under `key`, replacing any existing entry.
    fn store(&self, key: &CacheKey, primes: &PrimeSet) -> Result<(), CacheError>;

    /// Remove the entry under `key`.
    ///
    /// Returns `Ok(true)` if an entry existed and was removed.
    fn remove(&self, key: &CacheKey) -> Result<bool, CacheError>;
}

impl<C: PrimeCache + ?Sized> PrimeCache for &C {
    fn exists(&self, key: &CacheKey) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn load(&self, key: &CacheKey) -> Result<PrimeSet, CacheError> {
        (**self).load(key)
    }

    fn store(&self, key: &CacheKey, primes: &PrimeSet) -> Result<(), CacheError> {
        (**self).store(key, primes)
    }

    fn remove(&self, key: &CacheKey) -> Result<bool, CacheError> {
        (**self).remove(key)
    }
}
