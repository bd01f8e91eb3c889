//! Error types for configuration and driver operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cache::CacheError;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The config file is not valid INI.
    #[error("Failed to parse config file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A key holds a value that cannot be used.
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    /// The range parameters cannot be iterated.
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Errors returned by the cache-or-compute driver.
#[derive(Debug, Error)]
pub enum PrimeError {
    /// Storing or loading the cached prime set failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The driver was given an unusable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "range.step".to_string(),
            value: "two".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for 'range.step': two");
    }

    #[test]
    fn test_prime_error_from_config_error() {
        let err: PrimeError = ConfigError::InvalidRange("step must be at least 1".into()).into();
        assert!(matches!(err, PrimeError::Config(_)));
        assert_eq!(err.to_string(), "Invalid range: step must be at least 1");
    }

    #[test]
    fn test_prime_error_from_cache_error() {
        let err: PrimeError = CacheError::Io {
            path: PathBuf::from("/nowhere/x.npy"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(matches!(err, PrimeError::Cache(_)));
        assert!(err.to_string().contains("/nowhere/x.npy"));
    }
}
