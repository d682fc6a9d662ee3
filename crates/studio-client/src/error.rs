use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("keyring error: {0}")]
    Keyring(String),
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("home directory is not set")]
    NoHome,
}

/// Failure of a single API call.
///
/// `Http` carries the status of a completed non-2xx response. Every other
/// variant means no usable response was received and reports status 0.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{message}")]
    Network { message: String },
    #[error("unexpected response payload: {message}")]
    Decode { message: String },
    #[error("auth state storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            message: format!("Network error: {err}"),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            Self::Network { .. } | Self::Decode { .. } | Self::Storage(_) => 0,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }
}
