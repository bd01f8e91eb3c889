//! Settings shared across CLI commands.
//!
//! Precedence is command line flags, then the config file, then defaults.

use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use primecache::config::{ConfigFile, DEFAULT_CONFIG_FILE};
use primecache::error::ConfigError;
use primecache::RangeConfig;

use crate::error::CliError;

/// Range overrides accepted on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// Base value of the range
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Span covered from the start
    #[arg(long, global = true)]
    pub length: Option<i64>,

    /// Distance between candidates
    #[arg(long, global = true)]
    pub step: Option<i64>,

    /// Offset of the first candidate from the start
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub offset: Option<i64>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Candidate range.
    pub range: RangeConfig,
    /// Directory holding cache artifacts.
    pub cache_dir: PathBuf,
}

/// Merge the config file and command line flags.
///
/// An explicitly named config file must exist; the default one is optional.
pub fn resolve_settings(
    config_path: Option<&Path>,
    cli_cache_dir: Option<PathBuf>,
    args: &RangeArgs,
) -> Result<Settings, CliError> {
    let config = match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
                }
                .into());
            }
            ConfigFile::load_from(path)?
        }
        None => ConfigFile::load_from(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    let range = RangeConfig::new(
        args.start.unwrap_or(config.range.start),
        args.length.unwrap_or(config.range.length),
        args.step.unwrap_or(config.range.step),
        args.offset.unwrap_or(config.range.offset),
    )?;

    Ok(Settings {
        range,
        cache_dir: cli_cache_dir.unwrap_or(config.cache.directory),
    })
}
