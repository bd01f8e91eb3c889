//! Logging setup.
//!
//! Events go to stderr so stdout carries only command output. `RUST_LOG`
//! overrides the default directive.

use tracing_subscriber::EnvFilter;

/// Default filter directive.
pub const DEFAULT_DIRECTIVE: &str = "primecache=info";

/// Filter directive used with `--verbose`.
pub const VERBOSE_DIRECTIVE: &str = "primecache=debug";

/// Build the filter for the given verbosity.
pub fn build_filter(verbose: bool) -> EnvFilter {
    let directive = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Install the global fmt subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
        tracing::info!("logging initialized");
    }
}
