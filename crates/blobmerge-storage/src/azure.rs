use crate::connection_string::{ConnectionString, Credential};
use crate::keys::blob_path;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::azure::{AzureConfigKey, MicrosoftAzureBuilder};
use object_store::Error as ObjectStoreError;
use object_store::{GetOptions, ObjectStore, PutMode, PutOptions, PutPayload};
use std::sync::Arc;
use std::time::Instant;

const EMULATOR_BASE_URL: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// Azure Blob Storage implementation bound to one container
#[derive(Clone)]
pub struct AzureBlobStorage {
    store: Arc<dyn ObjectStore>,
    container: String,
    base_url: String,
}

impl AzureBlobStorage {
    /// Create a new AzureBlobStorage instance
    ///
    /// Building the client is purely local: no request is sent until the
    /// first download or upload.
    ///
    /// # Arguments
    /// * `connection_string` - Parsed storage account connection string
    /// * `container` - Name of the container every operation targets
    pub fn new(
        connection_string: &ConnectionString,
        container: impl Into<String>,
    ) -> StorageResult<Self> {
        let container = container.into();
        let mut builder = MicrosoftAzureBuilder::new().with_container_name(container.clone());

        let base_url = match connection_string {
            ConnectionString::DevelopmentStorage => {
                builder = builder.with_use_emulator(true);
                EMULATOR_BASE_URL.to_string()
            }
            ConnectionString::Account {
                account_name,
                credential,
                blob_endpoint,
            } => {
                builder = builder
                    .with_account(account_name.clone())
                    .with_endpoint(blob_endpoint.clone())
                    .with_allow_http(blob_endpoint.starts_with("http://"));

                builder = match credential {
                    Credential::AccountKey(key) => builder.with_access_key(key.clone()),
                    Credential::SharedAccessSignature(sas) => {
                        builder.with_config(AzureConfigKey::SasKey, sas.clone())
                    }
                };

                blob_endpoint.clone()
            }
        };

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(AzureBlobStorage {
            store: Arc::new(store),
            container,
            base_url,
        })
    }

    /// Wrap an existing object store, e.g. `object_store::memory::InMemory`.
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        container: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        AzureBlobStorage {
            store,
            container: container.into(),
            base_url: base_url.into(),
        }
    }

    /// Generate the URL of a blob: `{endpoint}/{container}/{blob}`
    fn generate_url(&self, blob_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.container,
            blob_name
        )
    }
}

/// Map object store failures onto storage errors. Anything that is not a
/// missing blob or an auth failure becomes `fallback`.
fn classify(
    err: ObjectStoreError,
    blob_name: &str,
    fallback: fn(String) -> StorageError,
) -> StorageError {
    match err {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(blob_name.to_string()),
        e @ (ObjectStoreError::PermissionDenied { .. }
        | ObjectStoreError::Unauthenticated { .. }) => StorageError::Unauthorized(e.to_string()),
        other => fallback(other.to_string()),
    }
}

#[async_trait]
impl Storage for AzureBlobStorage {
    async fn download(&self, blob_name: &str) -> StorageResult<Vec<u8>> {
        let location = blob_path(blob_name)?;
        let start = Instant::now();

        let result = self.store.get_opts(&location, GetOptions::default()).await;

        let bytes = match result {
            Ok(result) => result.bytes().await,
            Err(e) => Err(e),
        }
        .map_err(|e| {
            tracing::error!(
                error = %e,
                container = %self.container,
                key = %blob_name,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Azure download failed"
            );
            classify(e, blob_name, StorageError::DownloadFailed)
        })?;

        tracing::info!(
            container = %self.container,
            key = %blob_name,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Azure download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn upload(&self, blob_name: &str, data: Vec<u8>) -> StorageResult<String> {
        let location = blob_path(blob_name)?;
        let size = data.len();
        let payload = PutPayload::from(Bytes::from(data));
        let start = Instant::now();

        self.store
            .put_opts(&location, payload, PutOptions::from(PutMode::Overwrite))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %self.container,
                    key = %blob_name,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Azure upload failed"
                );
                classify(e, blob_name, StorageError::UploadFailed)
            })?;

        let url = self.generate_url(blob_name);

        tracing::info!(
            container = %self.container,
            key = %blob_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Azure upload successful"
        );

        Ok(url)
    }

    fn container(&self) -> &str {
        &self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn memory_storage() -> AzureBlobStorage {
        AzureBlobStorage::from_store(
            Arc::new(InMemory::new()),
            "uploads",
            "https://acct.blob.core.windows.net",
        )
    }

    #[tokio::test]
    async fn test_upload_download() {
        let storage = memory_storage();

        let url = storage
            .upload("Subu1.txt/Subu1.txt", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://acct.blob.core.windows.net/uploads/Subu1.txt/Subu1.txt"
        );

        let downloaded = storage.download("Subu1.txt/Subu1.txt").await.unwrap();
        assert_eq!(downloaded, b"hello");
    }

    #[tokio::test]
    async fn test_download_missing_blob() {
        let storage = memory_storage();

        let result = storage.download("missing.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound(name)) if name == "missing.txt"));
    }

    #[tokio::test]
    async fn test_upload_overwrites() {
        let storage = memory_storage();

        storage.upload("merged_result.txt", b"old".to_vec()).await.unwrap();
        storage.upload("merged_result.txt", b"new".to_vec()).await.unwrap();

        let downloaded = storage.download("merged_result.txt").await.unwrap();
        assert_eq!(downloaded, b"new");
    }

    #[tokio::test]
    async fn test_invalid_names_rejected() {
        let storage = memory_storage();

        let result = storage.download("").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload("/rooted.txt", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload("dir/", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(matches!(
            storage.download("dir").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_build_from_account_key() {
        let cs = ConnectionString::parse("AccountName=acct;AccountKey=a2V5").unwrap();
        let storage = AzureBlobStorage::new(&cs, "uploads").unwrap();

        assert_eq!(storage.container(), "uploads");
        assert_eq!(
            storage.generate_url("a.txt"),
            "https://acct.blob.core.windows.net/uploads/a.txt"
        );
    }

    #[test]
    fn test_build_for_emulator() {
        let storage =
            AzureBlobStorage::new(&ConnectionString::DevelopmentStorage, "uploads").unwrap();
        assert_eq!(
            storage.generate_url("a.txt"),
            "http://127.0.0.1:10000/devstoreaccount1/uploads/a.txt"
        );
    }
}
