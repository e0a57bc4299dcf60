use thiserror::Error;

#[derive(Debug, Error)]
pub enum CwrError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lookup table not found: {0}")]
    TableNotFound(String),
    #[error("unsupported CWR version: {0}")]
    UnsupportedVersion(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CwrError>;
