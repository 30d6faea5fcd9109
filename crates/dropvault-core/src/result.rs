//! Application-wide result alias.

use crate::error::AppError;

/// Shorthand for `Result<T, AppError>` used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;
