//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// S3 bucket settings and presigned-URL lifetimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket receiving all uploads.
    #[serde(default)]
    pub bucket: String,
    /// Key prefix under which objects are stored.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Lifetime of presigned download URLs in seconds.
    #[serde(default = "default_download_ttl")]
    pub download_url_ttl_seconds: u64,
    /// Lifetime of presigned upload URLs in seconds.
    #[serde(default = "default_upload_ttl")]
    pub upload_url_ttl_seconds: u64,
    /// Maximum accepted upload size in bytes (default 1 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            key_prefix: default_key_prefix(),
            download_url_ttl_seconds: default_download_ttl(),
            upload_url_ttl_seconds: default_upload_ttl(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_key_prefix() -> String {
    "uploads".to_string()
}

fn default_download_ttl() -> u64 {
    300
}

fn default_upload_ttl() -> u64 {
    900
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GB
}
