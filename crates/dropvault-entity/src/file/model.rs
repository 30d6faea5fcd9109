//! File metadata record.

use serde::{Deserialize, Serialize};

/// Metadata for an uploaded file, keyed by its secret-derived identifier.
///
/// The identifier doubles as the object key suffix in the store and as the
/// capability token callers must present to download. The shared secret
/// that produced it is never persisted; the record alone grants nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Secret-derived identifier (primary key).
    pub id: String,
    /// Original display filename as uploaded.
    pub file_name: String,
    /// Uploading user, when the upload was authenticated.
    pub owner_id: Option<String>,
}

impl FileRecord {
    /// Creates a record binding an identifier to its display name.
    pub fn new(id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            owner_id: None,
        }
    }

    /// Attaches the uploading user.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }
}
