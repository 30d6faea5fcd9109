//! Traits defining the seams between crates.

pub mod storage;

pub use storage::{ByteStream, ObjectStore, StoredObject};
