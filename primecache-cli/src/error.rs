//! CLI error type.

use std::io;

use thiserror::Error;

use primecache::cache::CacheError;
use primecache::error::ConfigError;
use primecache::PrimeError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The driver failed to compute, store or load the primes.
    #[error("{0}")]
    Run(#[from] PrimeError),

    /// Inspecting the cache failed.
    #[error("Failed to read cache status: {0}")]
    CacheStatus(CacheError),

    /// Clearing the cache failed.
    #[error("Failed to clear cache: {0}")]
    CacheClear(CacheError),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(io::Error),
}
