//! DynamoDB metadata store: client construction and repositories.
//!
//! The tables are treated as opaque GET/PUT/Scan/Query services; no
//! provisioning happens here. Each repository decodes attribute maps into
//! entities and surfaces malformed records as serialization errors.

pub mod client;
pub mod item;
pub mod repositories;
