//! Blobmerge Storage Library
//!
//! This crate provides the storage abstraction used by the merge tool and its
//! Azure Blob Storage implementation.
//!
//! # Blob names
//!
//! A storage client is bound to one container at construction, so every
//! operation takes only a blob name. Names are validated in the `keys`
//! module: they must be non-empty, must not start with `/`, and must not
//! contain empty path segments.

pub mod azure;
pub mod connection_string;
pub mod factory;
pub(crate) mod keys;
pub mod traits;

// Re-export commonly used types
pub use azure::AzureBlobStorage;
pub use connection_string::{ConnectionString, ConnectionStringError, Credential};
pub use factory::create_storage;
pub use traits::{Storage, StorageError, StorageResult};
