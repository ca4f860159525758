#![forbid(unsafe_code)]

//! Streaming HTTP transport.
//!
//! [`Net`] is the seam the downloader talks to; [`HttpClient`] implements it
//! on top of `reqwest`. Layers such as [`TimeoutNet`] wrap any [`Net`] via
//! [`NetExt`]. There is no retry layer: a failed transfer
//! surfaces to the caller as a [`NetError`].

mod client;
mod error;
mod timeout;
mod traits;
mod types;

pub use crate::{
    client::HttpClient,
    error::{NetError, NetResult},
    timeout::TimeoutNet,
    traits::{ByteStream, Net, NetExt, NetResponse},
    types::{CachePolicy, Headers, NetOptions},
};

#[cfg(any(test, feature = "test-utils"))]
pub use crate::traits::MockNet;
