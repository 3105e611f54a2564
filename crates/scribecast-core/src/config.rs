//! Object-store configuration loaded from `.env`.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | NCP_ENDPOINT_URL | (required) | S3-compatible endpoint URL. |
//! | NCP_ACCESS_KEY | (required) | Access key ID. |
//! | NCP_SECRET_KEY | (required) | Secret access key. |
//! | NCP_BUCKET_NAME | (required) | Bucket holding `results/` and `audio/`. |
//! | NCP_REGION | kr-standard | Signing region. |

use crate::error::ConfigError;

/// Connection settings for the S3-compatible object store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint_url: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}

impl StoreConfig {
    /// Load from environment. Missing or blank required variables fail here
    /// so the gateway refuses to boot half-configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint_url: require_env("NCP_ENDPOINT_URL")?,
            access_key: require_env("NCP_ACCESS_KEY")?,
            secret_key: require_env("NCP_SECRET_KEY")?,
            bucket: require_env("NCP_BUCKET_NAME")?,
            region: env_or("NCP_REGION", "kr-standard"),
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingEnv(name))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}
