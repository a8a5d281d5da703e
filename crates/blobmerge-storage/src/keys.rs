//! Blob name validation shared by storage implementations.

use object_store::path::Path;

use crate::traits::{StorageError, StorageResult};

/// Convert a blob name to an object store path.
///
/// Rejects empty names, names with a leading or trailing `/`, and names with
/// empty segments such as `a//b` before any request is made.
pub fn blob_path(blob_name: &str) -> StorageResult<Path> {
    if blob_name.is_empty() {
        return Err(StorageError::InvalidKey("Blob name is empty".to_string()));
    }

    if blob_name.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Blob name must not start with '/': {}",
            blob_name
        )));
    }

    // Path::parse would silently drop it and write to the parent name.
    if blob_name.ends_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Blob name must not end with '/': {}",
            blob_name
        )));
    }

    Path::parse(blob_name)
        .map_err(|e| StorageError::InvalidKey(format!("{}: {}", blob_name, e)))
}
