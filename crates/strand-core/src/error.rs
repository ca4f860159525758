use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Identifier must not be empty")]
    EmptyIdentifier,
}

pub type CoreResult<T> = Result<T, CoreError>;
