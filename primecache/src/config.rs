//! INI configuration file.
//!
//! ```ini
//! [range]
//! start = 10000
//! length = 10000
//! step = 2
//! offset = 1
//!
//! [cache]
//! directory = .
//! ```
//!
//! A missing file or missing key falls back to the defaults. Command line
//! flags are applied on top by the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::ConfigError;
use crate::range::RangeConfig;

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "primecache.ini";

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Directory holding cache artifacts.
    pub directory: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Candidate range.
    pub range: RangeConfig,
    /// Cache settings.
    pub cache: CacheSettings,
}

impl ConfigFile {
    /// Load from `path`. A file that does not exist yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let ini = Ini::load_from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_ini(&ini)?;
        tracing::debug!(path = %path.display(), range = %config.range, "Loaded config file");
        Ok(config)
    }

    /// Build from an already parsed INI document.
    ///
    /// Values are only parsed here. The range is validated once command line
    /// overrides have been merged in.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("range")) {
            let range = &mut config.range;
            if let Some(v) = section.get("start") {
                range.start = parse_i64("range.start", v)?;
            }
            if let Some(v) = section.get("length") {
                range.length = parse_i64("range.length", v)?;
            }
            if let Some(v) = section.get("step") {
                range.step = parse_i64("range.step", v)?;
            }
            if let Some(v) = section.get("offset") {
                range.offset = parse_i64("range.offset", v)?;
            }
        }

        if let Some(section) = ini.section(Some("cache")) {
            if let Some(v) = section.get("directory") {
                let v = v.trim();
                if v.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "cache.directory".to_string(),
                        value: String::new(),
                    });
                }
                config.cache.directory = PathBuf::from(v);
            }
        }

        Ok(config)
    }
}

fn parse_i64(key: &str, value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
