//! Error types for store access and snapshot fetching.

use thiserror::Error;

/// A store-level failure (transport, auth, service-side). A missing key is
/// NOT an error; the store seam encodes it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object store fault ({code}): {message}")]
    Fault { code: String, message: String },
}

impl StoreError {
    pub fn fault(code: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Fault {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Failure of one snapshot fetch-and-decode cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed daily result blob: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Startup configuration problems. Unset store credentials are fatal at
/// boot rather than at first request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
}
