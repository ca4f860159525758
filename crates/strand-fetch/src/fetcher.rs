use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use strand_assets::AssetCache;
use strand_core::{CacheKey, WeightsSource};
use strand_events::EventBus;
use strand_net::Net;
use strand_platform::time::{Instant, elapsed_millis};
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::{DownloadState, FetchError, FetchOptions, FetchResult};

/// Downloads assets through the cache, reporting progress on the bus.
#[derive(Clone)]
pub struct ProgressiveFetcher {
    net: Arc<dyn Net>,
    cache: Arc<dyn AssetCache>,
    bus: EventBus,
    options: FetchOptions,
}

impl ProgressiveFetcher {
    pub fn new(
        net: Arc<dyn Net>,
        cache: Arc<dyn AssetCache>,
        bus: EventBus,
        options: FetchOptions,
    ) -> Self {
        Self {
            net,
            cache,
            bus,
            options,
        }
    }

    /// Bytes of `url`, from the cache when present.
    ///
    /// A cache hit emits nothing. On a miss the body is streamed,
    /// progress is emitted at most once per `progress_interval`, and the
    /// complete buffer is stored before returning. A failed store is logged
    /// and does not fail the fetch.
    ///
    /// # Errors
    ///
    /// [`FetchError::Net`] if the transfer cannot be opened,
    /// [`FetchError::Stream`] if the body breaks off.
    pub async fn fetch(&self, url: &Url) -> FetchResult<Bytes> {
        let key = CacheKey::from_url(url);
        match self.cache.lookup(&key).await {
            Ok(Some(bytes)) => {
                debug!(url = %url, bytes = bytes.len(), "cache hit");
                return Ok(bytes);
            }
            Ok(None) => debug!(url = %url, "cache miss"),
            Err(e) => warn!(url = %url, error = %e, "cache lookup failed, downloading"),
        }

        let bytes = self.download(url).await?;
        if let Err(e) = self.cache.store(&key, bytes.clone()).await {
            warn!(url = %url, error = %e, "failed to store download in cache");
        }
        Ok(bytes)
    }

    /// Fetches every source and joins them; see [`assemble`](Self::assemble).
    ///
    /// # Errors
    ///
    /// The first fetch failure.
    pub async fn fetch_source(&self, source: &WeightsSource) -> FetchResult<Bytes> {
        match source {
            WeightsSource::Single(url) => self.fetch(url).await,
            WeightsSource::Sharded(urls) => self.assemble(urls).await,
        }
    }

    async fn download(&self, url: &Url) -> FetchResult<Bytes> {
        let started = Instant::now();
        let mut response = self
            .net
            .stream(url.clone(), self.options.cache_policy.headers())
            .await?;
        let mut state = DownloadState::new(
            url.clone(),
            response.content_length,
            self.options.progress_interval,
        );

        let mut chunks = Vec::new();
        while let Some(chunk) = response.body.next().await {
            let chunk = chunk.map_err(|source| FetchError::Stream {
                url: url.to_string(),
                received: state.received(),
                source,
            })?;
            state.advance(chunk.len());
            trace!(url = %url, len = chunk.len(), received = state.received(), "chunk");
            chunks.push(chunk);

            if let Some(progress) = state.tick(Instant::now()) {
                self.bus.emit(progress).await;
            }
        }

        let mut buf = BytesMut::with_capacity(usize::try_from(state.received()).unwrap_or(0));
        for chunk in &chunks {
            buf.extend_from_slice(chunk);
        }
        info!(
            url = %url,
            bytes = buf.len(),
            elapsed_ms = elapsed_millis(started),
            "download complete"
        );
        Ok(buf.freeze())
    }
}
