//! On-disk JSON cache keyed by category.
//!
//! Each entry lives in its own file, `<md5(category)>_<kind>.json`, under the
//! store's directory. Age is taken from the file's modification time, so an
//! entry can be expired by touching nothing more than its mtime.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use md5::{Digest, Md5};
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::cache::error::CacheError;

/// Entries older than this are treated as absent.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Pages,
    Frequencies,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::Pages => "pages",
            CacheKind::Frequencies => "frequencies",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem-safe name of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheToken(String);

impl CacheToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn cache_key(category: &str, kind: CacheKind) -> CacheToken {
    let digest = Md5::new().chain_update(category.as_bytes()).finalize();
    CacheToken(format!("{}_{}", hex::encode(digest), kind))
}

#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    max_age: Duration,
}

impl CacheStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>, max_age: Duration) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| CacheError::CreateDir {
                path: dir.clone(),
                source,
            })?;

        debug!("cache store ready at {}", dir.display());
        Ok(Self { dir, max_age })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn path(&self, token: &CacheToken) -> PathBuf {
        self.dir.join(format!("{token}.json"))
    }

    pub async fn load<T: DeserializeOwned>(&self, token: &CacheToken) -> Option<T> {
        self.load_with_max_age(token, self.max_age).await
    }

    /// Returns `None` for missing, stale, unreadable or malformed entries.
    /// Only the last two are logged; a missing or stale entry is a normal miss.
    pub async fn load_with_max_age<T: DeserializeOwned>(
        &self,
        token: &CacheToken,
        max_age: Duration,
    ) -> Option<T> {
        let path = self.path(token);

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not stat cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .unwrap_or_default();
        if age > max_age {
            debug!("cache entry {} expired ({:?} old)", token, age);
            return None;
        }

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(payload) => {
                debug!("cache hit for {}", token);
                Some(payload)
            }
            Err(e) => {
                warn!(
                    "Ignoring malformed cache entry {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Replaces the entry for `token`. The payload is written to a sibling
    /// temp file first so readers never observe a partial document.
    pub async fn save<T: Serialize + ?Sized>(
        &self,
        token: &CacheToken,
        payload: &T,
    ) -> Result<(), CacheError> {
        let path = self.path(token);
        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(payload)?;

        fs::write(&temp_path, json)
            .await
            .map_err(|source| CacheError::Write {
                path: temp_path.clone(),
                source,
            })?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|source| CacheError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("cached {}", token);
        Ok(())
    }

    pub async fn invalidate(&self, token: &CacheToken) -> Result<(), CacheError> {
        let path = self.path(token);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Remove { path, source }),
        }
    }
}
