//! Upload orchestration.

use std::sync::Arc;

use bytes::Bytes;

use dropvault_core::config::storage::StorageConfig;
use dropvault_core::result::AppResult;
use dropvault_core::traits::ObjectStore;
use dropvault_database::repositories::FileRepository;
use dropvault_entity::file::FileRecord;

use crate::capability;

/// Handles file ingestion: derive the identifier, land the bytes in the
/// object store, record the metadata.
///
/// The two writes are not atomic; a failure between them leaves either an
/// orphaned object or a dangling record. Failures surface immediately and
/// no compensation is attempted.
#[derive(Debug, Clone)]
pub struct UploadService {
    files: Arc<FileRepository>,
    store: Arc<dyn ObjectStore>,
    storage: StorageConfig,
}

/// Result of the presigned-upload variant.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PresignedUpload {
    /// The derived identifier (capability token).
    pub identifier: String,
    /// Time-boxed URL granting direct write access.
    pub url: String,
    /// URL lifetime in seconds.
    pub expires_in_seconds: u64,
}

impl UploadService {
    /// Creates the service.
    pub fn new(
        files: Arc<FileRepository>,
        store: Arc<dyn ObjectStore>,
        storage: StorageConfig,
    ) -> Self {
        Self {
            files,
            store,
            storage,
        }
    }

    /// Uploads file content under a secret-derived identifier and records
    /// its metadata. Returns the identifier as the capability token.
    pub async fn upload(
        &self,
        secret: &str,
        file_name: &str,
        data: Bytes,
        owner_id: Option<String>,
    ) -> AppResult<String> {
        let identifier = capability::derive_identifier(secret, file_name)?;
        let key = capability::object_key(&self.storage.key_prefix, &identifier);

        let size = data.len();
        self.store.put(&key, data).await?;

        let mut record = FileRecord::new(identifier.clone(), file_name);
        if let Some(owner) = owner_id {
            record = record.with_owner(owner);
        }
        self.files.put(&record).await?;

        tracing::info!(identifier = %identifier, bytes = size, "File uploaded");
        Ok(identifier)
    }

    /// Presigned-upload variant: records the metadata and hands back a
    /// time-boxed PUT URL so the client ships the bytes to the store
    /// directly.
    pub async fn presigned_upload(
        &self,
        secret: &str,
        file_name: &str,
        owner_id: Option<String>,
    ) -> AppResult<PresignedUpload> {
        let identifier = capability::derive_identifier(secret, file_name)?;
        let key = capability::object_key(&self.storage.key_prefix, &identifier);

        let mut record = FileRecord::new(identifier.clone(), file_name);
        if let Some(owner) = owner_id {
            record = record.with_owner(owner);
        }
        self.files.put(&record).await?;

        let expires_in_seconds = self.storage.upload_url_ttl_seconds;
        let url = self
            .store
            .presign_upload(&key, std::time::Duration::from_secs(expires_in_seconds))
            .await?;

        tracing::info!(identifier = %identifier, "Presigned upload issued");
        Ok(PresignedUpload {
            identifier,
            url,
            expires_in_seconds,
        })
    }
}
