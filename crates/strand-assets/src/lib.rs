#![forbid(unsafe_code)]

//! # strand-assets
//!
//! Key to bytes store for downloaded assets.
//!
//! ## Public contract
//!
//! [`AssetCache`] is the whole contract: `lookup` returns `Ok(None)` on a
//! miss (absence is not an error) and `store` records an immutable entry.
//! Entries are never mutated once stored; eviction is left to whatever owns
//! the backing storage.
//!
//! ## Backends
//!
//! - [`MemAssetCache`]: process-scoped `DashMap`.
//! - [`DiskAssetCache`]: persistent, scoped to `<cache_dir>/<namespace>/`.
//!   Each entry is `<hex(sha256(key))[..32]>.bin`, written with a
//!   temp-file-then-rename so readers never see a partial entry.
//!
//! Lookups and stores are check-then-act, not atomic. Two concurrent misses
//! for the same key both download and both store identical bytes.

mod cache;
mod disk;
mod error;
mod mem;
mod options;

pub use cache::AssetCache;
#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockAssetCache;
pub use disk::DiskAssetCache;
pub use error::{AssetsError, AssetsResult};
pub use mem::MemAssetCache;
pub use options::StoreOptions;
