//! Object store trait for the external media service that holds file bytes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// What the object store hands back after accepting an upload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    /// Public URL the content is delivered from.
    pub url: String,
    /// Thumbnail URL, if the store generates one.
    pub thumbnail_url: Option<String>,
    /// Path of the object inside the store (e.g. `/dropln/u1/folder/x/y.png`).
    pub stored_path: String,
    /// Store-side identifier, needed to remove the object again.
    pub object_id: String,
}

/// Trait for binary storage backends.
///
/// The tree store calls [`ObjectStore::store`] exactly once per created
/// file, before the node row is written. [`ObjectStore::remove`] is only
/// used to clean up after a failed insert.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "imagekit", "local").
    fn provider_type(&self) -> &str;

    /// Upload `data` into `folder` under `file_name`.
    async fn store(&self, data: Bytes, folder: &str, file_name: &str) -> AppResult<StoredObject>;

    /// Remove a previously stored object by its store-side identifier.
    async fn remove(&self, object_id: &str) -> AppResult<()>;
}
