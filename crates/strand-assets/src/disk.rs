#![forbid(unsafe_code)]

//! Persistent asset cache on the local filesystem.

use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use bytes::Bytes;
use strand_core::CacheKey;
use tracing::{debug, trace};

use crate::{
    cache::AssetCache,
    error::{AssetsError, AssetsResult},
    options::StoreOptions,
};

/// [`AssetCache`] persisted under `<cache_dir>/<namespace>/`.
#[derive(Clone, Debug)]
pub struct DiskAssetCache {
    root: PathBuf,
}

impl DiskAssetCache {
    /// Opens (creating if needed) the namespace directory.
    ///
    /// # Errors
    ///
    /// - [`AssetsError::InvalidNamespace`] if the namespace is empty or is not
    ///   a single plain path segment.
    /// - [`AssetsError::Io`] if the directory cannot be created.
    pub async fn open(options: &StoreOptions) -> AssetsResult<Self> {
        let ns = options.namespace.as_str();
        if ns.is_empty() || ns == "." || ns == ".." || ns.contains(['/', '\\']) {
            return Err(AssetsError::InvalidNamespace(ns.to_owned()));
        }

        let root = options.root();
        tokio::fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "disk cache opened");

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(format!("{}.bin", key.file_stem()))
    }
}

/// Writes `data` to a temp file in `dir`, then renames it onto `path`.
///
/// `dir` must be on the same filesystem as `path`. The temp file is removed
/// on every failure path.
fn write_atomic(dir: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl AssetCache for DiskAssetCache {
    async fn lookup(&self, key: &CacheKey) -> AssetsResult<Option<Bytes>> {
        match tokio::fs::read(self.entry_path(key)).await {
            Ok(data) => {
                trace!(key = %key, len = data.len(), "disk cache hit");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, key: &CacheKey, bytes: Bytes) -> AssetsResult<()> {
        let path = self.entry_path(key);
        if tokio::fs::try_exists(&path).await? {
            trace!(key = %key, "disk cache entry already present");
            return Ok(());
        }

        let root = self.root.clone();
        let target = path.clone();
        let data = bytes.clone();
        tokio::task::spawn_blocking(move || write_atomic(&root, &target, &data))
            .await
            .map_err(std::io::Error::other)??;

        debug!(key = %key, len = bytes.len(), path = %path.display(), "disk cache store");
        Ok(())
    }
}
