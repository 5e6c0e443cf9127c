//! Build the configured object store.

use std::sync::Arc;

use tracing::info;

use dropln_core::config::{ObjectStoreKind, StorageConfig};
use dropln_core::result::AppResult;
use dropln_core::traits::storage::ObjectStore;

use crate::providers::imagekit::ImageKitObjectStore;
use crate::providers::local::LocalObjectStore;
use crate::providers::memory::MemoryObjectStore;

/// Instantiate the object store selected by `storage.provider`.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.provider {
        ObjectStoreKind::Imagekit => Arc::new(ImageKitObjectStore::new(&config.imagekit)?),
        ObjectStoreKind::Local => Arc::new(LocalObjectStore::new(&config.local).await?),
        ObjectStoreKind::Memory => Arc::new(MemoryObjectStore::new()),
    };

    info!(provider = store.provider_type(), "Object store initialized");
    Ok(store)
}
