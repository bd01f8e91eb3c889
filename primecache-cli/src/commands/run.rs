//! The cache-or-compute run.

use std::io::{self, BufWriter, Write};

use primecache::cache::DiskCache;
use primecache::{DriverOutcome, PrimeDriver};

use super::common::Settings;
use crate::error::CliError;

/// One-line summary of a run.
pub fn summary(outcome: &DriverOutcome) -> String {
    format!("{} ({})", outcome.primes, outcome.source)
}

/// Write the optional prime listing followed by the summary line.
pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &DriverOutcome,
    print: bool,
) -> io::Result<()> {
    if print {
        for prime in &outcome.primes {
            writeln!(out, "{}", prime)?;
        }
    }
    writeln!(out, "{}", summary(outcome))?;
    out.flush()
}

/// Map a report write failure to a CLI error.
///
/// A closed pipe (e.g. `| head`) ends output early and is not an error.
pub fn finish_report(result: io::Result<()>) -> Result<(), CliError> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(CliError::Output),
    }
}

/// Run the driver against the disk cache and report the result.
pub fn run(settings: &Settings, force: bool, print: bool) -> Result<(), CliError> {
    let cache = DiskCache::new(&settings.cache_dir);
    let driver = PrimeDriver::new(settings.range, cache);

    tracing::debug!(
        version = primecache::VERSION,
        range = %settings.range,
        artifact = %driver.cache().artifact_path(driver.key()).display(),
        "Starting run"
    );

    let outcome = if force {
        driver.recompute()?
    } else {
        driver.run()?
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    finish_report(write_report(&mut out, &outcome, print))
}

#[cfg(test)]
mod tests {
    use super::*;
    use primecache::cache::PrimeCache;
    use primecache::{PrimeSet, RangeConfig, Source};
    use tempfile::TempDir;

    #[test]
    fn test_summary() {
        let outcome = DriverOutcome {
            primes: PrimeSet::from(vec![10007, 10009]),
            source: Source::Loaded,
        };
        assert_eq!(
            summary(&outcome),
            "2 primes in [10007, 10009] (loaded from cache)"
        );
    }

    /// Writer that fails every write with the given error kind.
    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "write failed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn small_outcome() -> DriverOutcome {
        DriverOutcome {
            primes: PrimeSet::from(vec![2, 3]),
            source: Source::Computed,
        }
    }

    #[test]
    fn test_write_report() {
        let mut out = Vec::new();
        write_report(&mut out, &small_outcome(), true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2\n3\n2 primes in [2, 3] (computed)\n"
        );
    }

    #[test]
    fn test_broken_pipe_is_not_an_error() {
        let result = write_report(
            &mut FailingWriter(io::ErrorKind::BrokenPipe),
            &small_outcome(),
            true,
        );
        assert!(finish_report(result).is_ok());
    }

    #[test]
    fn test_other_write_errors_propagate() {
        let result = write_report(
            &mut FailingWriter(io::ErrorKind::Other),
            &small_outcome(),
            false,
        );
        assert!(matches!(finish_report(result), Err(CliError::Output(_))));
    }

    #[test]
    fn test_run_writes_artifact() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            range: RangeConfig::new(0, 100, 1, 0).unwrap(),
            cache_dir: temp.path().to_path_buf(),
        };

        run(&settings, false, false).unwrap();

        let cache = DiskCache::new(temp.path());
        let key = primecache::cache::CacheKey::from_range(&settings.range);
        assert_eq!(cache.load(&key).unwrap().len(), 25);
    }

    #[test]
    fn test_force_replaces_corrupt_artifact() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            range: RangeConfig::new(0, 100, 1, 0).unwrap(),
            cache_dir: temp.path().to_path_buf(),
        };
        let cache = DiskCache::new(temp.path());
        let key = primecache::cache::CacheKey::from_range(&settings.range);
        std::fs::write(cache.artifact_path(&key), b"junk").unwrap();

        assert!(matches!(
            run(&settings, false, false),
            Err(CliError::Run(_))
        ));
        run(&settings, true, false).unwrap();
        assert_eq!(cache.load(&key).unwrap().len(), 25);
    }
}
