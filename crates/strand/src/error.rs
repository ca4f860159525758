#![forbid(unsafe_code)]

use strand_assets::AssetsError;
use strand_net::NetError;
use thiserror::Error;

/// Failure to bring a worker up.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("HTTP client setup failed: {0}")]
    Net(#[from] NetError),

    #[error("asset cache setup failed: {0}")]
    Assets(#[from] AssetsError),
}

pub type SetupResult<T> = Result<T, SetupError>;
