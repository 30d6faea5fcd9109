//! Concrete repositories over the DynamoDB client.

pub mod file;
pub mod user;

pub use file::FileRepository;
pub use user::UserRepository;
