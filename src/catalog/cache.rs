//! On-disk JSON cache of the country list.
//!
//! File layout: `{"timestamp": <unix millis>, "data": [Country, ...]}`.
//! Entries older than the load policy's TTL are treated as missing.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::{Country, SourceError};

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    timestamp: u64,
    data: Vec<Country>,
}

/// JSON file cache.
#[derive(Clone, Debug)]
pub struct JsonCache {
    path: PathBuf,
}

impl JsonCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read cached countries no older than `ttl`.
    pub async fn read(&self, ttl: Duration) -> Result<Vec<Country>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let cached: CacheFile = serde_json::from_slice(&bytes)?;

        let age = now_millis().saturating_sub(cached.timestamp);
        if u128::from(age) > ttl.as_millis() {
            return Err(SourceError::Expired);
        }
        if cached.data.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(cached.data)
    }

    /// Replace the cache with `countries`, stamped with the current time.
    pub async fn write(&self, countries: &[Country]) -> Result<(), SourceError> {
        let file = CacheFile {
            timestamp: now_millis(),
            data: countries.to_vec(),
        };
        let bytes = serde_json::to_vec(&file)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
