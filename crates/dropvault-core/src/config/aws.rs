//! AWS client configuration.

use serde::{Deserialize, Serialize};

/// Credentials and regions for the managed AWS services.
///
/// DynamoDB and S3 may live in different regions, so each gets its own
/// region field. An explicit endpoint switches the S3 client into
/// path-style addressing for MinIO-compatible services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Region for the DynamoDB metadata tables.
    #[serde(default = "default_region")]
    pub region: String,
    /// Region for the S3 bucket.
    #[serde(default = "default_region")]
    pub s3_region: String,
    /// Custom S3 endpoint URL (MinIO etc.); empty means AWS.
    #[serde(default)]
    pub s3_endpoint: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            region: default_region(),
            s3_region: default_region(),
            s3_endpoint: String::new(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}
