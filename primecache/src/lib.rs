//! primecache - odd primes of a numeric range, memoized to disk
//!
//! The library finds the primes among a configured sequence of candidates by
//! trial division and persists the result as an NPY array, so that later runs
//! over the same range load the file instead of recomputing.
//!
//! # Example
//!
//! ```no_run
//! use primecache::cache::DiskCache;
//! use primecache::driver::PrimeDriver;
//! use primecache::range::RangeConfig;
//!
//! let cache = DiskCache::new(".");
//! let driver = PrimeDriver::new(RangeConfig::default(), cache);
//! let outcome = driver.run()?;
//! println!("{} primes ({})", outcome.primes.len(), outcome.source);
//! # Ok::<(), primecache::error::PrimeError>(())
//! ```

pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod npy;
pub mod prime_set;
pub mod primality;
pub mod range;

pub use driver::{compute_primes, DriverOutcome, PrimeDriver, Source};
pub use error::PrimeError;
pub use prime_set::PrimeSet;
pub use primality::{integer_sqrt, is_prime};
pub use range::RangeConfig;

/// Crate version, recorded for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
