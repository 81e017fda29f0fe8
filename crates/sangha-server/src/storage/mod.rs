//! External object storage for gallery photos and event banners.
//!
//! The portal never serves image bytes itself; uploads go to an
//! S3-compatible bucket and only the public URL and object key are
//! persisted. Without a configured bucket the storage client runs disabled
//! and upload endpoints answer 503.

use crate::error::{AppError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
    pub key: String,
}

#[derive(Clone)]
pub struct ObjectStorage {
    client: Option<aws_sdk_s3::Client>,
    bucket: String,
    public_base_url: String,
}

impl ObjectStorage {
    /// Builds the client from the ambient AWS configuration. `bucket` being
    /// unset leaves storage disabled.
    pub async fn new(bucket: Option<String>, public_base_url: Option<String>) -> Self {
        let Some(bucket) = bucket else {
            tracing::warn!("Object storage bucket not configured; uploads are disabled");
            return Self {
                client: None,
                bucket: String::new(),
                public_base_url: String::new(),
            };
        };

        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = aws_sdk_s3::Client::new(&config);
        let public_base_url = public_base_url
            .unwrap_or_else(|| format!("https://{bucket}.s3.amazonaws.com"));

        Self {
            client: Some(client),
            bucket,
            public_base_url,
        }
    }

    /// Uploads raw bytes under `prefix/` with a fresh object key, keeping
    /// the original file extension for content negotiation downstream.
    pub async fn upload(
        &self,
        prefix: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredObject> {
        let client = self.client.as_ref().ok_or(AppError::StorageUnavailable)?;

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("bin");
        let key = format!("{prefix}/{}.{extension}", Uuid::new_v4());

        client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Object upload failed: {}", e)))?;

        let url = format!("{}/{key}", self.public_base_url.trim_end_matches('/'));
        tracing::info!(key = %key, "Uploaded object to storage");

        Ok(StoredObject { url, key })
    }
}
