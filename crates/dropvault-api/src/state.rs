//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dropvault_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use dropvault_core::config::AppConfig;
use dropvault_core::traits::ObjectStore;
use dropvault_database::repositories::{FileRepository, UserRepository};
use dropvault_service::file::{DownloadService, UploadService};
use dropvault_service::user::UserService;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    /// Object store backend.
    pub object_store: Arc<dyn ObjectStore>,
    /// File metadata repository.
    pub file_repo: Arc<FileRepository>,
    /// User repository.
    pub user_repo: Arc<UserRepository>,

    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2).
    pub password_hasher: Arc<PasswordHasher>,

    /// Upload orchestration.
    pub upload_service: Arc<UploadService>,
    /// Download verification and delivery.
    pub download_service: Arc<DownloadService>,
    /// User account operations.
    pub user_service: Arc<UserService>,

    /// Per-client rate limiter.
    pub rate_limiter: RateLimiter,
}
