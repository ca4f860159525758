#![forbid(unsafe_code)]

use strand_fetch::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Tokenizer or config bytes could not be parsed.
    #[error("failed to decode {asset}: {reason}")]
    AssetDecode { asset: String, reason: String },

    #[error("engine construction failed: {0}")]
    Construct(String),

    #[error("prompt initialization failed: {0}")]
    Init(String),

    #[error("generation failed: {0}")]
    Generation(String),
}

impl EngineError {
    pub fn asset_decode(asset: impl Into<String>, reason: impl ToString) -> Self {
        Self::AssetDecode {
            asset: asset.into(),
            reason: reason.to_string(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
