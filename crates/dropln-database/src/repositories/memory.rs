//! In-process node repository.
//!
//! Mirrors the PostgreSQL repository's filtering, ordering and
//! conditional-update semantics. Used when `database.url` is `memory://`
//! and by tests that must not depend on a running database.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_core::types::OwnerId;
use dropln_entity::node::{NewNode, Node};

use super::{NodeRepository, ToggleField};

/// Node repository backed by a map guarded by an async lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryNodeRepository {
    nodes: Arc<RwLock<HashMap<Uuid, Node>>>,
    fail_inserts: Arc<AtomicBool>,
}

impl MemoryNodeRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail with a database error.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of stored nodes, deleted ones included.
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Whether the repository holds no nodes.
    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }
}

fn sort_for_listing(nodes: &mut [Node]) {
    nodes.sort_by(|a, b| {
        b.is_folder
            .cmp(&a.is_folder)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[async_trait]
impl NodeRepository for MemoryNodeRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        Ok(self.nodes.read().await.get(&id).cloned())
    }

    async fn find_children(
        &self,
        owner: &OwnerId,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut children: Vec<Node> = nodes
            .values()
            .filter(|n| n.is_owned_by(owner) && n.parent_id == parent_id && !n.is_deleted)
            .cloned()
            .collect();
        sort_for_listing(&mut children);
        Ok(children)
    }

    async fn find_starred(&self, owner: &OwnerId) -> AppResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut starred: Vec<Node> = nodes
            .values()
            .filter(|n| n.is_owned_by(owner) && n.is_starred && !n.is_deleted)
            .cloned()
            .collect();
        sort_for_listing(&mut starred);
        Ok(starred)
    }

    async fn find_deleted(&self, owner: &OwnerId) -> AppResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut deleted: Vec<Node> = nodes
            .values()
            .filter(|n| n.is_owned_by(owner) && n.is_deleted)
            .cloned()
            .collect();
        deleted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(deleted)
    }

    async fn insert(&self, node: &NewNode) -> AppResult<Node> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::database("Failed to insert node"));
        }

        let mut nodes = self.nodes.write().await;
        if nodes.contains_key(&node.id) {
            return Err(AppError::database("Duplicate node id"));
        }
        if let Some(parent_id) = node.parent_id
            && !nodes.contains_key(&parent_id)
        {
            return Err(AppError::invalid_parent("Invalid parent folder"));
        }

        let stored = node.clone().into_node(Utc::now());
        nodes.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn compare_and_set(
        &self,
        owner: &OwnerId,
        id: Uuid,
        field: ToggleField,
        new_value: bool,
    ) -> AppResult<Option<Node>> {
        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get_mut(&id) else {
            return Ok(None);
        };
        if !node.is_owned_by(owner) || field.get(node) == new_value {
            return Ok(None);
        }

        match field {
            ToggleField::Starred => node.is_starred = new_value,
            ToggleField::Deleted => node.is_deleted = new_value,
        }
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
