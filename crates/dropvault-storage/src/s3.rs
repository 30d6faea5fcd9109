//! S3-compatible object store.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use bytes::Bytes;
use tokio_util::io::ReaderStream;

use dropvault_core::config::aws::AwsConfig;
use dropvault_core::config::storage::StorageConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::traits::storage::{ObjectStore, StoredObject};

/// Object store backed by an S3-compatible service.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Creates a store from configuration.
    ///
    /// A non-empty endpoint switches the client into path-style
    /// addressing for MinIO and other S3-compatible services.
    pub fn new(aws: &AwsConfig, storage: &StorageConfig) -> AppResult<Self> {
        if storage.bucket.is_empty() {
            return Err(AppError::configuration("storage.bucket must be set"));
        }

        let credentials = Credentials::new(&aws.access_key, &aws.secret_key, None, None, "dropvault");

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(aws.s3_region.clone()))
            .credentials_provider(credentials);

        if !aws.s3_endpoint.is_empty() {
            builder = builder
                .endpoint_url(&aws.s3_endpoint)
                .force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        tracing::info!(
            region = %aws.s3_region,
            bucket = %storage.bucket,
            "S3 object store initialized"
        );

        Ok(Self {
            client,
            bucket: storage.bucket.clone(),
        })
    }

    /// Returns the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn health_check(&self) -> AppResult<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(bucket = %self.bucket, error = %e, "Bucket health check failed");
                Ok(false)
            }
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.into())
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Failed to put object {key}: {e}")))?;

        tracing::debug!(key, "Object stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<StoredObject> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    AppError::not_found(format!("Object not found: {key}"))
                } else {
                    AppError::storage(format!("Failed to get object {key}: {e}"))
                }
            })?;

        let content_type = resp.content_type().map(str::to_string);
        let content_length = resp.content_length();
        let stream = ReaderStream::new(resp.body.into_async_read());

        Ok(StoredObject {
            stream: Box::pin(stream),
            content_type,
            content_length,
        })
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::storage(format!(
                "Failed to head object {key}: {e}"
            ))),
        }
    }

    async fn presign_download(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::internal(format!("Invalid presign expiry: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::storage(format!("Failed to presign download for {key}: {e}")))?;

        Ok(presigned.uri().to_string())
    }

    async fn presign_upload(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::internal(format!("Invalid presign expiry: {e}")))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::storage(format!("Failed to presign upload for {key}: {e}")))?;

        Ok(presigned.uri().to_string())
    }
}
