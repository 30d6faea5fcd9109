//! Core types shared across all DropVault crates: the unified error type,
//! configuration schemas, and the object-store trait.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
