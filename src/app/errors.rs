use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("browser is not installed or its profile store is unreachable")]
    NotInstalled,

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("malformed browser data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}

/// What a source section shows when its fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NotInstalled,
    Unknown,
}

impl From<&ProviderError> for ErrorKind {
    fn from(err: &ProviderError) -> Self {
        match err {
            ProviderError::NotInstalled => ErrorKind::NotInstalled,
            _ => ErrorKind::Unknown,
        }
    }
}
