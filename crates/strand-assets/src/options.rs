use std::path::PathBuf;

/// Where the persistent cache lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// Directory for persistent cache storage.
    pub cache_dir: PathBuf,
    /// Sub-directory separating independent caches under one `cache_dir`.
    pub namespace: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir().join("strand"),
            namespace: "strand-model-cache".to_owned(),
        }
    }
}

impl StoreOptions {
    pub fn new<P: Into<PathBuf>>(cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// `<cache_dir>/<namespace>`.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.cache_dir.join(&self.namespace)
    }
}
