//! Cache-or-compute driver.
//!
//! Each run checks the cache once and then takes exactly one of two paths:
//!
//! ```text
//!            ┌───────┐  exists   ┌──────┐
//!            │ CHECK │──────────►│ LOAD │───────┐
//!            └───┬───┘           └──────┘       ▼
//!                │ absent                    ┌──────┐
//!                └──────────►┌─────────┐────►│ DONE │
//!                            │ COMPUTE │     └──────┘
//!                            └─────────┘
//! ```
//!
//! COMPUTE tests every candidate of the range and stores the result. LOAD
//! returns the stored set as is. A failed load is returned to the caller;
//! the driver never falls back to recomputation.

use std::fmt;
use std::time::Instant;

use crate::cache::{CacheKey, PrimeCache};
use crate::error::PrimeError;
use crate::prime_set::PrimeSet;
use crate::primality::is_prime;
use crate::range::RangeConfig;

/// Which path produced the prime set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Computed by trial division and written to the cache.
    Computed,
    /// Read from the cache.
    Loaded,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Computed => write!(f, "computed"),
            Source::Loaded => write!(f, "loaded from cache"),
        }
    }
}

/// Result of a driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOutcome {
    /// The primes of the configured range.
    pub primes: PrimeSet,
    /// Whether the set was computed or loaded.
    pub source: Source,
}

/// Collect the primes among the range's candidates, in generation order.
pub fn compute_primes(range: &RangeConfig) -> PrimeSet {
    range.candidates().filter(|&n| is_prime(n)).collect()
}

/// Runs the cache-or-compute flow for one range against one cache.
pub struct PrimeDriver<C> {
    range: RangeConfig,
    cache: C,
    key: CacheKey,
}

impl<C: PrimeCache> PrimeDriver<C> {
    /// Create a driver for `range` backed by `cache`.
    pub fn new(range: RangeConfig, cache: C) -> Self {
        let key = CacheKey::from_range(&range);
        Self { range, cache, key }
    }

    /// The range this driver covers.
    pub fn range(&self) -> &RangeConfig {
        &self.range
    }

    /// The cache key derived from the range.
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Load the cached set if present, otherwise compute and store it.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid, the cache cannot be queried,
    /// the computed set cannot be stored, or the cached set cannot be loaded.
    pub fn run(&self) -> Result<DriverOutcome, PrimeError> {
        self.range.validate()?;

        if self.cache.exists(&self.key)? {
            tracing::info!(key = %self.key, "Cached prime set found");
            let primes = self.cache.load(&self.key)?;
            tracing::info!(count = primes.len(), "Loaded prime set from cache");
            return Ok(DriverOutcome {
                primes,
                source: Source::Loaded,
            });
        }

        tracing::info!(key = %self.key, "No cached prime set, computing");
        self.compute_and_store()
    }

    /// Compute the set and overwrite any cached entry, skipping the check.
    pub fn recompute(&self) -> Result<DriverOutcome, PrimeError> {
        self.range.validate()?;
        tracing::info!(key = %self.key, "Recomputing prime set");
        self.compute_and_store()
    }

    fn compute_and_store(&self) -> Result<DriverOutcome, PrimeError> {
        let started = Instant::now();
        let primes = compute_primes(&self.range);
        tracing::info!(
            range = %self.range,
            candidates = self.range.candidate_count(),
            count = primes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Computed prime set"
        );

        self.cache.store(&self.key, &primes)?;

        Ok(DriverOutcome {
            primes,
            source: Source::Computed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, MemoryCache};

    /// Primes in [10001, 19999]: pi(20000) - pi(10000) = 2262 - 1229.
    const DEFAULT_RANGE_PRIME_COUNT: usize = 1033;

    #[test]
    fn test_compute_default_range() {
        let primes = compute_primes(&RangeConfig::default());
        assert_eq!(primes.len(), DEFAULT_RANGE_PRIME_COUNT);
        assert_eq!(primes.first(), Some(10007));
        assert!(primes.iter().all(|&p| p > 10000 && p < 20000));
        assert!(primes.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_compute_small_range() {
        // Odd numbers 1, 3, ..., 29
        let range = RangeConfig::new(0, 30, 2, 1).unwrap();
        assert_eq!(
            compute_primes(&range).into_vec(),
            vec![3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
    }

    #[test]
    fn test_compute_overflowing_range_does_not_panic() {
        let range = RangeConfig {
            start: i64::MAX - 1,
            length: 4,
            step: 1,
            offset: 0,
        };
        // i64::MAX - 1 is even and i64::MAX is divisible by 7.
        assert!(compute_primes(&range).is_empty());
    }

    #[test]
    fn test_first_run_computes_second_loads() {
        let cache = MemoryCache::new();
        let driver = PrimeDriver::new(RangeConfig::default(), &cache);

        let first = driver.run().unwrap();
        assert_eq!(first.source, Source::Computed);
        assert_eq!(cache.entry_count(), 1);

        let second = driver.run().unwrap();
        assert_eq!(second.source, Source::Loaded);
        assert_eq!(second.primes, first.primes);
    }

    #[test]
    fn test_load_path_returns_cached_values_as_is() {
        let cache = MemoryCache::new();
        let range = RangeConfig::default();
        let stored = PrimeSet::from(vec![10007]);
        cache.store(&CacheKey::from_range(&range), &stored).unwrap();

        let outcome = PrimeDriver::new(range, &cache).run().unwrap();
        assert_eq!(outcome.source, Source::Loaded);
        assert_eq!(outcome.primes, stored);
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let cache = MemoryCache::new();
        let driver = PrimeDriver::new(RangeConfig::default(), &cache);
        cache.insert_raw(driver.key(), b"garbage".to_vec());

        let err = driver.run().unwrap_err();
        assert!(matches!(
            err,
            PrimeError::Cache(CacheError::Codec { .. })
        ));
        // Not healed by recomputation
        assert!(driver.cache().load(driver.key()).is_err());
    }

    #[test]
    fn test_recompute_overwrites_entry() {
        let cache = MemoryCache::new();
        let driver = PrimeDriver::new(RangeConfig::default(), &cache);
        cache.insert_raw(driver.key(), b"garbage".to_vec());

        let outcome = driver.recompute().unwrap();
        assert_eq!(outcome.source, Source::Computed);
        assert_eq!(driver.run().unwrap().primes, outcome.primes);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let range = RangeConfig {
            step: 0,
            ..RangeConfig::default()
        };
        let driver = PrimeDriver::new(range, MemoryCache::new());
        assert!(matches!(driver.run(), Err(PrimeError::Config(_))));
        assert_eq!(driver.cache().entry_count(), 0);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Computed.to_string(), "computed");
        assert_eq!(Source::Loaded.to_string(), "loaded from cache");
    }
}
