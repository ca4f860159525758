#![forbid(unsafe_code)]

use strand_net::NetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The transfer could not be opened.
    #[error("network error: {0}")]
    Net(#[from] NetError),

    /// The body failed part-way through.
    #[error("stream of {url} failed after {received} bytes: {source}")]
    Stream {
        url: String,
        received: u64,
        #[source]
        source: NetError,
    },
}

pub type FetchResult<T> = Result<T, FetchError>;
