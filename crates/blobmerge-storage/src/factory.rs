use crate::{AzureBlobStorage, ConnectionString, Storage, StorageError, StorageResult};
use blobmerge_core::Config;
use std::sync::Arc;

/// Create the storage client described by the configuration.
///
/// Parses the connection string and builds the client; no network call is
/// made here, so a bad connection string fails before any I/O.
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let connection_string = ConnectionString::parse(config.connection_string())
        .map_err(|e| StorageError::ConfigError(e.to_string()))?;

    tracing::debug!(
        account = connection_string.account_name().unwrap_or("devstoreaccount1"),
        endpoint = connection_string.blob_endpoint().unwrap_or("emulator"),
        container = %config.container_name(),
        "Creating Azure blob storage client"
    );

    let storage = AzureBlobStorage::new(&connection_string, config.container_name())?;
    Ok(Arc::new(storage))
}
