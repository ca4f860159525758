#![forbid(unsafe_code)]

//! In-memory asset cache.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use strand_core::CacheKey;
use tracing::trace;

use crate::{cache::AssetCache, error::AssetsResult};

/// Process-scoped [`AssetCache`]. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemAssetCache {
    entries: Arc<DashMap<CacheKey, Bytes>>,
}

impl MemAssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}

#[async_trait]
impl AssetCache for MemAssetCache {
    async fn lookup(&self, key: &CacheKey) -> AssetsResult<Option<Bytes>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn store(&self, key: &CacheKey, bytes: Bytes) -> AssetsResult<()> {
        trace!(key = %key, len = bytes.len(), "mem cache store");
        self.entries.entry(key.clone()).or_insert(bytes);
        Ok(())
    }
}
