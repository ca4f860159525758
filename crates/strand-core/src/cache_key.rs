use std::fmt;

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::CoreResult;

/// Canonical identity of a cached asset.
///
/// Built from the source URL with the fragment dropped. The query is kept:
/// signed or versioned URLs address different bytes. Scheme/host case and
/// default ports are already normalized by [`Url`] parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut canonical = url.clone();
        canonical.set_fragment(None);
        Self(canonical.into())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`](crate::CoreError::InvalidUrl) if `raw` is not a URL.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        Ok(Self::from_url(&Url::parse(raw.trim())?))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stable file name for on-disk storage: first 16 bytes of SHA-256, hex.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..16])
    }
}

impl From<&Url> for CacheKey {
    fn from(url: &Url) -> Self {
        Self::from_url(url)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
