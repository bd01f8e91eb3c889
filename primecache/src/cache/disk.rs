//! On-disk cache provider storing one NPY artifact per key.
//!
//! Artifacts live at `<directory>/<key>.npy`. Writes go to a `.tmp` sibling
//! first and are renamed into place, so a reader never sees a half-written
//! artifact under its final name.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cache::traits::{CacheError, CacheKey, PrimeCache};
use crate::npy;
use crate::prime_set::PrimeSet;

/// Size and element count of a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    /// Path of the artifact file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of primes in the artifact.
    pub entries: usize,
}

/// Result of clearing the cache directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearResult {
    /// Number of artifact files deleted.
    pub files_deleted: usize,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

/// Prime set cache backed by NPY files in a directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    directory: PathBuf,
}

impl DiskCache {
    /// Create a disk cache rooted at `directory`.
    ///
    /// The directory is created on first store if it does not exist.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Root directory of the cache.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the artifact for `key`.
    pub fn artifact_path(&self, key: &CacheKey) -> PathBuf {
        self.directory
            .join(format!("{}.{}", key.as_str(), npy::EXTENSION))
    }

    /// Describe the artifact for `key`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the artifact exists but cannot be read or decoded.
    pub fn status(&self, key: &CacheKey) -> Result<Option<ArtifactStatus>, CacheError> {
        if !self.exists(key)? {
            return Ok(None);
        }
        let path = self.artifact_path(key);

        let data = read_file(&path)?;
        let entries = npy::element_count(&data).map_err(|source| CacheError::Codec {
            path: path.clone(),
            source,
        })?;

        Ok(Some(ArtifactStatus {
            size_bytes: data.len() as u64,
            path,
            entries,
        }))
    }

    /// Delete every `.npy` artifact in the cache directory.
    ///
    /// Other files are left alone. A missing directory counts as empty.
    pub fn clear(&self) -> Result<ClearResult, CacheError> {
        let mut result = ClearResult::default();

        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(result),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.directory.clone(),
                    source,
                })
            }
        };

        for entry in entries {
            let entry = entry.map_err(|source| CacheError::Io {
                path: self.directory.clone(),
                source,
            })?;
            let path = entry.path();
            let is_artifact = path.extension().is_some_and(|ext| ext == npy::EXTENSION);
            if !is_artifact || !path.is_file() {
                continue;
            }

            let size = entry
                .metadata()
                .map_err(|source| CacheError::Io {
                    path: path.clone(),
                    source,
                })?
                .len();
            fs::remove_file(&path).map_err(|source| CacheError::Io {
                path: path.clone(),
                source,
            })?;

            tracing::debug!(path = %path.display(), bytes = size, "Removed cache artifact");
            result.files_deleted += 1;
            result.bytes_freed += size;
        }

        Ok(result)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CacheError> {
    fs::read(path).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl PrimeCache for DiskCache {
    fn exists(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let path = self.artifact_path(key);
        match fs::metadata(&path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    fn load(&self, key: &CacheKey) -> Result<PrimeSet, CacheError> {
        let path = self.artifact_path(key);
        let data = read_file(&path)?;

        let values = npy::decode(&data).map_err(|source| CacheError::Codec {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            entries = values.len(),
            "Loaded prime set from disk"
        );

        Ok(PrimeSet::from(values))
    }

    fn store(&self, key: &CacheKey, primes: &PrimeSet) -> Result<(), CacheError> {
        fs::create_dir_all(&self.directory).map_err(|source| CacheError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.artifact_path(key);

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, npy::encode(primes.as_slice())).map_err(|source| {
            CacheError::Io {
                path: temp_path.clone(),
                source,
            }
        })?;
        fs::rename(&temp_path, &path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            entries = primes.len(),
            "Stored prime set on disk"
        );

        Ok(())
    }

    fn remove(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let path = self.artifact_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }
}
