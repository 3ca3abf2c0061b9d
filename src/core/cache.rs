//! On-disk memoization of the last successful, well-formed provider fetch.
//!
//! The cache is the raw payload, pretty-printed, with no metadata. There is no
//! TTL: a cached file is served until someone deletes it.

use crate::core::sanitize::sanitize;
use crate::domain::model::{DataOrigin, RawBatch};
use crate::domain::ports::SourceFetcher;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheProbe {
    Hit(serde_json::Value),
    Miss,
}

/// Looks at the cache file without touching the network.
///
/// A missing or empty file is a [`CacheProbe::Miss`]. Content that cannot be
/// read or parsed is reported as [`EtlError::CacheCorruptError`].
pub fn probe(cache_path: &Path) -> Result<CacheProbe> {
    let content = match fs::read_to_string(cache_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CacheProbe::Miss),
        Err(e) => {
            return Err(EtlError::CacheCorruptError {
                path: cache_path.display().to_string(),
                reason: e.to_string(),
            })
        }
    };

    if content.is_empty() {
        return Ok(CacheProbe::Miss);
    }

    serde_json::from_str(&content)
        .map(CacheProbe::Hit)
        .map_err(|e| EtlError::CacheCorruptError {
            path: cache_path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Overwrites the cache file with `payload`.
pub fn store(cache_path: &Path, payload: &serde_json::Value) -> Result<()> {
    let cache_write_error = |source: std::io::Error| EtlError::CacheWriteError {
        path: cache_path.display().to_string(),
        source,
    };

    let data = serde_json::to_vec_pretty(payload)
        .map_err(|e| cache_write_error(std::io::Error::new(ErrorKind::InvalidData, e)))?;
    fs::write(cache_path, data).map_err(cache_write_error)
}

/// Serves the cached payload when present, otherwise fetches and persists it.
///
/// A fetched payload is only persisted once it sanitizes cleanly; a malformed
/// batch fails here and leaves the cache untouched. A corrupt cache is logged
/// and treated as a miss, so the next successful fetch repairs it.
pub async fn load_or_fetch<F>(cache_path: &Path, fetcher: &F) -> Result<RawBatch>
where
    F: SourceFetcher + ?Sized,
{
    match probe(cache_path) {
        Ok(CacheProbe::Hit(payload)) => {
            tracing::info!("📂 Found cached data at {}, skipping fetch", cache_path.display());
            return Ok(RawBatch {
                payload,
                origin: DataOrigin::Cache,
            });
        }
        Ok(CacheProbe::Miss) => {
            tracing::debug!("No usable cache at {}", cache_path.display());
        }
        Err(e @ EtlError::CacheCorruptError { .. }) => {
            tracing::warn!("⚠️ {} - falling back to a live fetch", e);
        }
        Err(e) => return Err(e),
    }

    let payload = fetcher.fetch().await?;

    // 與輸出相同，資料驗證失敗時不寫入快取
    sanitize(&payload)?;
    store(cache_path, &payload)?;
    tracing::info!("💾 Fetched data written to: {}", cache_path.display());

    Ok(RawBatch {
        payload,
        origin: DataOrigin::Network,
    })
}
