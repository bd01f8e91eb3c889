//! Cache management CLI commands.

use clap::Subcommand;
use primecache::cache::{CacheKey, DiskCache};

use super::common::Settings;
use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Remove every cached prime set from the cache directory
    Clear,
    /// Show the cached artifact for the configured range
    Status,
}

/// Format a byte count using binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Run a cache subcommand.
pub fn run(action: CacheAction, settings: &Settings) -> Result<(), CliError> {
    let cache = DiskCache::new(&settings.cache_dir);

    match action {
        CacheAction::Clear => {
            println!("Clearing cache at: {}", cache.directory().display());

            let result = cache.clear().map_err(CliError::CacheClear)?;
            println!(
                "Deleted {} files, freed {}",
                result.files_deleted,
                format_size(result.bytes_freed)
            );
            Ok(())
        }
        CacheAction::Status => {
            let key = CacheKey::from_range(&settings.range);
            println!("Range: {}", settings.range);
            println!("Key:   {}", key);

            match cache.status(&key).map_err(CliError::CacheStatus)? {
                Some(status) => {
                    println!("  Path:    {}", status.path.display());
                    println!("  Primes:  {}", status.entries);
                    println!("  Size:    {}", format_size(status.size_bytes));
                }
                None => {
                    println!(
                        "  Not cached ({})",
                        cache.artifact_path(&key).display()
                    );
                }
            }
            Ok(())
        }
    }
}
