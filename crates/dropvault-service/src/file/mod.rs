//! File upload and download services.

pub mod download;
pub mod upload;

pub use download::{DownloadService, PresignedDownload};
pub use upload::{PresignedUpload, UploadService};
