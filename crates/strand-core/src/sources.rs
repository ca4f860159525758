use serde::{Deserialize, Serialize};
use url::Url;

/// Where a model's weights come from: one URL, or ordered shards that are
/// concatenated in list order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightsSource {
    Single(Url),
    Sharded(Vec<Url>),
}

impl WeightsSource {
    /// URLs in concatenation order.
    #[must_use]
    pub fn urls(&self) -> &[Url] {
        match self {
            Self::Single(url) => std::slice::from_ref(url),
            Self::Sharded(urls) => urls,
        }
    }
}

impl From<Url> for WeightsSource {
    fn from(url: Url) -> Self {
        Self::Single(url)
    }
}

impl From<Vec<Url>> for WeightsSource {
    fn from(urls: Vec<Url>) -> Self {
        Self::Sharded(urls)
    }
}
