//! Object-store seam: a narrow get/presign trait plus the S3 implementation.
//!
//! The trait exists so the store is an injected collaborator — handlers and
//! the notifier take `Arc<dyn ObjectStore>` and tests substitute an
//! in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use bytes::Bytes;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Opaque key-value blob store with get and presigned-URL generation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object at `key`. `Ok(None)` means the key does not
    /// exist — a valid empty state, not a failure.
    async fn get_object(&self, key: &str) -> Result<Option<Bytes>, StoreError>;

    /// Issue a time-limited, credential-free retrieval URL for `key`.
    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StoreError>;
}

/// S3-compatible store client (NCP Object Storage in production).
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    /// Build a client against a custom endpoint with static credentials.
    /// Path-style addressing: NCP resolves buckets in the path, not the host.
    pub fn new(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "scribecast-env",
        );
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint_url)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();
        Self {
            client: aws_sdk_s3::Client::from_conf(conf),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => {
                let body = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| StoreError::fault("ReadBody", e.to_string()))?;
                Ok(Some(body.into_bytes()))
            }
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    return Ok(None);
                }
                Err(store_fault(err))
            }
        }
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StoreError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StoreError::fault("Presigning", e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(store_fault)?;
        Ok(request.uri().to_string())
    }
}

fn store_fault<E>(err: SdkError<E>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err
        .as_service_error()
        .and_then(|e| e.meta().code())
        .unwrap_or("Unknown")
        .to_string();
    StoreError::Fault {
        code,
        message: DisplayErrorContext(&err).to_string(),
    }
}
