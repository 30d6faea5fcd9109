//! Object store trait for the managed storage backend.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading object contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A stored object opened for reading.
///
/// Carries the body stream together with the headers the download path
/// mirrors back to the client.
pub struct StoredObject {
    /// Body bytes.
    pub stream: ByteStream,
    /// Content type reported by the store, if any.
    pub content_type: Option<String>,
    /// Content length reported by the store, if any.
    pub content_length: Option<i64>,
}

impl std::fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredObject")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish()
    }
}

/// Trait for the object storage backend.
///
/// The trait is defined here in `dropvault-core` and implemented over the
/// S3 SDK in `dropvault-storage`. The store is treated as an opaque
/// PUT/GET/presign service; single-key atomicity is its responsibility.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the backing bucket is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write an object at the given key.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Open an object for reading.
    ///
    /// Returns `NotFound` if no object exists at the key.
    async fn get(&self, key: &str) -> AppResult<StoredObject>;

    /// Check whether an object exists at the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Issue a time-boxed presigned URL granting read access to the key.
    async fn presign_download(&self, key: &str, expires_in: Duration) -> AppResult<String>;

    /// Issue a time-boxed presigned URL granting write access to the key.
    async fn presign_upload(&self, key: &str, expires_in: Duration) -> AppResult<String>;
}
