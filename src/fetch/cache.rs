//! Content-addressed on-disk cache for remote documents.
//!
//! Layout: one flat file per URL, `<root>/<sha256(url)>`, holding the raw
//! response text. Entries never expire; they are removed only by
//! [`CacheService::clear`].

use crate::error::CacheError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Environment variable overriding the cache root
pub const CACHE_DIR_ENV: &str = "DRYTOML_CACHE_DIR";

/// A cached file, as reported by [`CacheService::entries`]
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Handle on a cache directory
#[derive(Debug, Clone)]
pub struct CacheService {
    root: PathBuf,
}

impl CacheService {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Cache rooted at [`default_root`]
    pub fn from_env() -> Self {
        Self::new(default_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lowercase hex SHA-256 of the URL string
    pub fn key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(Self::key(url))
    }

    /// Cached text for `url`, if any
    pub fn get(&self, url: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(url);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    /// Store `text` for `url`.
    ///
    /// The entry is written to a temporary file in the cache root and renamed
    /// into place, so readers never observe a partial entry.
    pub fn put(&self, url: &str, text: &str) -> Result<PathBuf, CacheError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(url);

        let mut temp = tempfile::NamedTempFile::new_in(&self.root)?;
        temp.write_all(text.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)?;

        debug!(url, path = %path.display(), "Stored cache entry");
        Ok(path)
    }

    /// All cached files, sorted by name
    pub fn entries(&self) -> Result<Vec<CacheEntryInfo>, CacheError> {
        let mut entries = Vec::new();
        if !self.root.exists() {
            return Ok(entries);
        }

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|e| {
                CacheError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk cache directory: {}", e),
                ))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            entries.push(CacheEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                size,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Total size in bytes of all cached files
    pub fn total_size(&self) -> Result<u64, CacheError> {
        Ok(self.entries()?.iter().map(|e| e.size).sum())
    }

    /// Remove cached entries.
    ///
    /// With `name`, only entries whose file stem equals the stem of `name`
    /// are removed; a URL is accepted and hashed first. Returns the number
    /// of removed entries.
    pub fn clear(&self, name: Option<&str>) -> Result<usize, CacheError> {
        if !self.root.exists() {
            return Ok(0);
        }

        let wanted = name.map(|n| {
            if crate::reference::is_url(n) {
                Self::key(n)
            } else {
                file_stem(Path::new(n))
            }
        });

        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if let Some(ref wanted) = wanted {
                if &file_stem(&path) != wanted {
                    continue;
                }
            }
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            debug!(path = %path.display(), "Removed cache entry");
            removed += 1;
        }
        Ok(removed)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Cache root: `DRYTOML_CACHE_DIR`, then `$XDG_CACHE_HOME/drytoml`, then the
/// platform cache directory.
pub fn default_root() -> PathBuf {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(xdg).join("drytoml");
    }
    directories::ProjectDirs::from("", "", "drytoml")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".cache/drytoml"))
}
