use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid cache namespace: {0:?}")]
    InvalidNamespace(String),
}

pub type AssetsResult<T> = Result<T, AssetsError>;
