//! Blob storage upload, grounded on `s3_utils.py`'s `upload_bytes_to_s3`.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::error::MediaError;

/// Whether the process is running under a cloud execution context.
///
/// Mirrors the reference's `is_lambda_context`: outside it, image/audio
/// fetch-and-upload short-circuits to deterministic mock data so the
/// pipeline runs end-to-end without external credentials (§4.7).
pub fn is_cloud_context() -> bool {
    std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok()
}

/// Object storage client for uploaded media and audio blobs.
#[derive(Clone)]
pub struct Blobs {
    client: Client,
    bucket: String,
}

impl Blobs {
    /// Wrap an already-configured S3 client around `bucket`.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the ambient AWS config and wrap it around `bucket`.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config), bucket)
    }

    /// Upload `data` to `key` with the given content type, returning the
    /// public HTTPS URL. In a non-cloud context this is a no-op that
    /// returns a mock URL, per §4.7.
    pub async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, MediaError> {
        if !is_cloud_context() {
            tracing::info!(key, "local dev mode: skipping upload");
            return Ok(format!("https://mock-s3-bucket.local/{key}"));
        }

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        Ok(format!("https://{}.s3.amazonaws.com/{key}", self.bucket))
    }

    /// Whether `key` already exists in storage. Always `false` outside a
    /// cloud context, so local dev mode never reuses stale mock uploads.
    pub async fn exists(&self, key: &str) -> bool {
        if !is_cloud_context() {
            return false;
        }

        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .is_ok()
    }

    /// Whether every one of `keys` already exists in storage (the media
    /// tool's idempotence check).
    pub async fn all_exist(&self, keys: &[&str]) -> bool {
        for key in keys {
            if !self.exists(key).await {
                return false;
            }
        }
        true
    }

    /// Public HTTPS URL for an existing key, without checking existence.
    pub fn url_for(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{key}", self.bucket)
    }
}
