//! Fixed names used by a merge run.

/// Environment variable holding the storage account connection string.
pub const CONNECTION_STRING_VAR: &str = "AZURE_STORAGE_CONNECTION_STRING";

/// Environment variable holding the container name.
pub const CONTAINER_NAME_VAR: &str = "AZURE_STORAGE_CONTAINER_NAME";

/// First source blob; its text precedes the separator.
pub const FIRST_SOURCE_BLOB: &str = "Subu1.txt/Subu1.txt";

/// Second source blob; its text follows the separator.
pub const SECOND_SOURCE_BLOB: &str = "Subu1.txt/Subu2.txt";

/// Destination blob for the merged result.
pub const MERGED_BLOB: &str = "merged_result.txt";

/// Inserted between the two source texts.
pub const SEPARATOR: &str = "\n";
