//! Download orchestration: verification plus the three delivery variants.

use std::sync::Arc;
use std::time::Duration;

use dropvault_core::config::storage::StorageConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::traits::{ObjectStore, StoredObject};
use dropvault_database::repositories::FileRepository;
use dropvault_entity::file::FileRecord;

use crate::capability;
use crate::qr;

/// Verifies download requests and serves the authorized file as a byte
/// stream, a presigned URL, or a QR-encoded image of that URL.
#[derive(Debug, Clone)]
pub struct DownloadService {
    files: Arc<FileRepository>,
    store: Arc<dyn ObjectStore>,
    storage: StorageConfig,
}

/// A granted presigned download.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PresignedDownload {
    /// Resolved display filename.
    pub file_name: String,
    /// Time-boxed URL granting direct read access.
    pub url: String,
    /// URL lifetime in seconds.
    pub expires_in_seconds: u64,
}

impl DownloadService {
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

    /// Looks up and authorizes a download request.
    ///
    /// Missing inputs are rejected before any lookup; an absent record is
    /// not-found regardless of the secret; a record whose recomputed
    /// identifier does not match is unauthorized.
    async fn resolve(&self, identifier: &str, secret: &str) -> AppResult<FileRecord> {
        if identifier.is_empty() {
            return Err(AppError::validation("Identifier must not be empty"));
        }
        if secret.is_empty() {
            return Err(AppError::validation("Shared secret must not be empty"));
        }

        let record = self.files.get(identifier).await?;
        let record = capability::authorize(record.as_ref(), identifier, secret)?;
        Ok(record.clone())
    }

    /// Opens the file for streaming; the caller mirrors the stored
    /// object's content type and length back to the client.
    pub async fn open(&self, identifier: &str, secret: &str) -> AppResult<(FileRecord, StoredObject)> {
        let record = self.resolve(identifier, secret).await?;
        let key = capability::object_key(&self.storage.key_prefix, &record.id);
        let object = self.store.get(&key).await?;

        tracing::info!(identifier = %record.id, "Download authorized");
        Ok((record, object))
    }

    /// Issues a time-boxed presigned URL for the file.
    pub async fn presigned_url(&self, identifier: &str, secret: &str) -> AppResult<PresignedDownload> {
        let record = self.resolve(identifier, secret).await?;
        let key = capability::object_key(&self.storage.key_prefix, &record.id);

        let expires_in_seconds = self.storage.download_url_ttl_seconds;
        let url = self
            .store
            .presign_download(&key, Duration::from_secs(expires_in_seconds))
            .await?;

        tracing::info!(identifier = %record.id, "Presigned download issued");
        Ok(PresignedDownload {
            file_name: record.file_name,
            url,
            expires_in_seconds,
        })
    }

    /// Renders the presigned URL as a PNG QR code.
    pub async fn qr_png(&self, identifier: &str, secret: &str) -> AppResult<Vec<u8>> {
        let presigned = self.presigned_url(identifier, secret).await?;
        qr::encode_png(&presigned.url)
    }
}
