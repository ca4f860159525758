#![forbid(unsafe_code)]

//! Top-level worker configuration.

use std::sync::Arc;

use strand_assets::{AssetCache, DiskAssetCache, MemAssetCache, StoreOptions};
use strand_engine::{EngineFactory, SessionRegistry};
use strand_events::EventBus;
use strand_fetch::{FetchOptions, ProgressiveFetcher};
use strand_net::{HttpClient, NetExt, NetOptions};
use strand_worker::{GenerationOptions, Worker, WorkerHandle};
use tracing::debug;

/// Where downloaded assets are kept between requests.
#[derive(Clone, Debug, Default)]
pub enum CacheBackend {
    /// Process lifetime only.
    Memory,
    /// Persistent under [`StoreOptions::root`].
    #[default]
    Disk,
}

/// Everything needed to start a worker.
///
/// ```ignore
/// let handle = WorkerConfig::default()
///     .with_store(StoreOptions::new("/var/cache/strand"))
///     .with_generation(GenerationOptions::default().with_repeat_last_n(32))
///     .spawn(factory)
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub net: NetOptions,
    pub store: StoreOptions,
    pub cache: CacheBackend,
    pub fetch: FetchOptions,
    pub generation: GenerationOptions,
    /// Events a slow [`subscribe`](WorkerHandle::subscribe) tap may fall
    /// behind before it lags.
    pub events_channel_capacity: usize,
    /// Host events buffered before generation waits for the host to read.
    pub host_channel_capacity: usize,
    pub command_channel_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            net: NetOptions::default(),
            store: StoreOptions::default(),
            cache: CacheBackend::default(),
            fetch: FetchOptions::default(),
            generation: GenerationOptions::default(),
            events_channel_capacity: 256,
            host_channel_capacity: 64,
            command_channel_capacity: 16,
        }
    }
}

impl WorkerConfig {
    #[must_use]
    pub fn with_net(mut self, net: NetOptions) -> Self {
        self.net = net;
        self
    }

    /// Also selects the disk backend.
    #[must_use]
    pub fn with_store(mut self, store: StoreOptions) -> Self {
        self.store = store;
        self.cache = CacheBackend::Disk;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheBackend) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    #[must_use]
    pub fn with_generation(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    #[must_use]
    pub fn with_events_channel_capacity(mut self, capacity: usize) -> Self {
        self.events_channel_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_host_channel_capacity(mut self, capacity: usize) -> Self {
        self.host_channel_capacity = capacity;
        self
    }

    /// Builds the HTTP client, cache, fetcher and registry and starts the
    /// worker's command loop on the current runtime.
    ///
    /// # Errors
    ///
    /// [`SetupError`] if the HTTP client or the disk cache cannot be created.
    pub async fn spawn<F: EngineFactory>(
        self,
        factory: F,
    ) -> crate::SetupResult<WorkerHandle> {
        let net = HttpClient::new(self.net.clone())?.with_timeout(self.net.request_timeout);
        let cache: Arc<dyn AssetCache> = match self.cache {
            CacheBackend::Memory => Arc::new(MemAssetCache::new()),
            CacheBackend::Disk => Arc::new(DiskAssetCache::open(&self.store).await?),
        };
        debug!(cache = ?self.cache, "starting worker");

        let (bus, host_events) =
            EventBus::with_host(self.events_channel_capacity, self.host_channel_capacity);
        let fetcher = ProgressiveFetcher::new(Arc::new(net), cache, bus.clone(), self.fetch);
        let registry = Arc::new(SessionRegistry::new(factory, fetcher, bus.clone()));
        Ok(Worker::spawn(
            registry,
            bus,
            host_events,
            self.generation,
            self.command_channel_capacity,
        ))
    }
}
