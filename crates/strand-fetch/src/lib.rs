#![forbid(unsafe_code)]

//! Cache-first progressive downloads.
//!
//! [`ProgressiveFetcher::fetch`] consults the [`AssetCache`](strand_assets::AssetCache),
//! streams the body on a miss, emits throttled [`DownloadProgress`]
//! snapshots on the [`EventBus`](strand_events::EventBus) and stores the
//! finished buffer. [`ProgressiveFetcher::assemble`] fetches shards
//! concurrently and joins them in input order.
//!
//! [`DownloadProgress`]: strand_events::DownloadProgress

mod assemble;
mod error;
mod estimator;
mod fetcher;
mod options;
mod state;
mod throttle;

pub use error::{FetchError, FetchResult};
pub use estimator::{EtaEstimator, RING_SLOTS, clamp_estimate};
pub use fetcher::ProgressiveFetcher;
pub use options::FetchOptions;
pub use state::DownloadState;
pub use throttle::ProgressThrottle;
