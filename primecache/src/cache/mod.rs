//! Prime set cache.
//!
//! # Available Providers
//!
//! - [`DiskCache`]: one NPY file per key in a directory
//! - [`MemoryCache`]: in-process map, used for tests and dry runs

mod disk;
mod memory;
mod traits;

pub use disk::{ArtifactStatus, ClearResult, DiskCache};
pub use memory::MemoryCache;
pub use traits::{CacheError, CacheKey, PrimeCache};
