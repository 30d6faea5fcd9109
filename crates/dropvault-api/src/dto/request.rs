//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Download request body, shared by all three delivery variants.
///
/// `hashed_secret` is the caller-presented identifier; `shared_secret` is
/// the secret it must re-derive from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Caller-presented identifier.
    pub hashed_secret: String,
    /// Caller-presented shared secret.
    pub shared_secret: String,
}

/// Presigned-upload request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresignUploadRequest {
    /// Shared secret to derive the identifier from.
    #[validate(length(min = 1, message = "shared_secret is required"))]
    pub shared_secret: String,
    /// Display filename of the object to be uploaded.
    #[validate(length(min = 1, message = "file_name is required"))]
    pub file_name: String,
}
