//! File metadata entities.

pub mod model;

pub use model::FileRecord;
