//! In-process object store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_core::traits::storage::{ObjectStore, StoredObject};

use super::object_path;

const BASE_URL: &str = "memory://objects";

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<String, (String, Bytes)>,
    removed: Vec<String>,
    store_calls: usize,
}

/// Object store that keeps objects in memory.
///
/// Failures can be injected so callers' error paths can be exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    inner: Arc<RwLock<Inner>>,
    fail_store: Arc<AtomicBool>,
    fail_remove: Arc<AtomicBool>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `store` calls fail.
    pub fn set_fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `remove` calls fail.
    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Number of `store` calls received, failed ones included.
    pub async fn store_calls(&self) -> usize {
        self.inner.read().await.store_calls
    }

    /// Number of objects currently held.
    pub async fn object_count(&self) -> usize {
        self.inner.read().await.objects.len()
    }

    /// Bytes stored at `path`, if any.
    pub async fn get(&self, path: &str) -> Option<Bytes> {
        self.inner
            .read()
            .await
            .objects
            .values()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.clone())
    }

    /// Object IDs passed to successful `remove` calls, in order.
    pub async fn removed(&self) -> Vec<String> {
        self.inner.read().await.removed.clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn store(&self, data: Bytes, folder: &str, file_name: &str) -> AppResult<StoredObject> {
        let mut inner = self.inner.write().await;
        inner.store_calls += 1;
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(AppError::storage("Object store unavailable"));
        }

        let path = object_path(folder, file_name);
        let object_id = Uuid::new_v4().simple().to_string();
        inner
            .objects
            .insert(object_id.clone(), (path.clone(), data));

        Ok(StoredObject {
            url: format!("{BASE_URL}{path}"),
            thumbnail_url: None,
            stored_path: path,
            object_id,
        })
    }

    async fn remove(&self, object_id: &str) -> AppResult<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(AppError::storage("Object store unavailable"));
        }
        let mut inner = self.inner.write().await;
        inner.objects.remove(object_id);
        inner.removed.push(object_id.to_string());
        Ok(())
    }
}
