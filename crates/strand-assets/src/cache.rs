use async_trait::async_trait;
use bytes::Bytes;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use strand_core::CacheKey;

use crate::error::AssetsResult;

/// Scoped key to bytes store consulted before every download.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssetCache: Send + Sync {
    /// Cached bytes for `key`, or `None` on a miss.
    async fn lookup(&self, key: &CacheKey) -> AssetsResult<Option<Bytes>>;

    /// Records `bytes` under `key`. An existing entry is left untouched.
    async fn store(&self, key: &CacheKey, bytes: Bytes) -> AssetsResult<()>;
}
