//! Local filesystem object store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use dropln_core::config::LocalStorageConfig;
use dropln_core::error::{AppError, ErrorKind};
use dropln_core::result::AppResult;
use dropln_core::traits::storage::{ObjectStore, StoredObject};

use super::object_path;

/// Object store that writes into a directory served under a base URL.
///
/// The object ID is the object path relative to the root.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    /// Create a new local object store, creating the root directory.
    pub async fn new(config: &LocalStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve an object path inside the root, rejecting traversal.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::invalid_input(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn store(&self, data: Bytes, folder: &str, file_name: &str) -> AppResult<StoredObject> {
        let path = object_path(folder, file_name);
        let full_path = self.resolve(&path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write object: {path}"), e)
        })?;

        debug!(path = %path, bytes = data.len(), "Wrote object");

        Ok(StoredObject {
            url: format!("{}{path}", self.public_base_url),
            thumbnail_url: None,
            stored_path: path.clone(),
            object_id: path,
        })
    }

    async fn remove(&self, object_id: &str) -> AppResult<()> {
        let full_path = self.resolve(object_id)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path = object_id, "Removed object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove object: {object_id}"),
                e,
            )),
        }
    }
}
