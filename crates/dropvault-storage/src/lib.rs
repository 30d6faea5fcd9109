//! Object storage backends.
//!
//! The [`dropvault_core::traits::ObjectStore`] trait is implemented here
//! over the S3 SDK.

pub mod s3;

pub use s3::S3ObjectStore;
