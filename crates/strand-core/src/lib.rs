#![forbid(unsafe_code)]

//! Shared building blocks for the strand workspace.
//!
//! - [`CacheKey`]: canonical, hashable identity of a remote asset URL.
//! - [`ModelId`]: identifier under which an inference session is registered.
//! - [`WeightsSource`]: single or sharded weight URLs.
//! - [`humanize`]: byte counts and durations rendered for people.

mod cache_key;
mod error;
pub mod humanize;
mod model_id;
mod sources;

pub use cache_key::CacheKey;
pub use error::{CoreError, CoreResult};
pub use humanize::{human_duration, human_size, truncate_2dp};
pub use model_id::ModelId;
pub use sources::WeightsSource;
