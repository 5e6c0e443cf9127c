//! Tree service: the only component that mutates nodes.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use dropln_auth::ownership::{require_owned, resolve_parent_folder};
use dropln_core::config::StorageConfig;
use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_core::traits::storage::ObjectStore;
use dropln_database::repositories::{NodeRepository, ToggleField};
use dropln_entity::node::{NewNode, Node, UploadedFile};

use crate::context::RequestContext;

/// How many times a toggle re-reads and retries after losing a race.
const TOGGLE_ATTEMPTS: usize = 3;

/// Lists, creates and toggles nodes on behalf of an authenticated owner.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Node repository.
    nodes: Arc<dyn NodeRepository>,
    /// Object store holding file bytes.
    objects: Arc<dyn ObjectStore>,
    /// Folder inside the object store all uploads go under.
    root_folder: String,
    /// Upload size limit in bytes.
    max_upload_bytes: u64,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        nodes: Arc<dyn NodeRepository>,
        objects: Arc<dyn ObjectStore>,
        storage: &StorageConfig,
    ) -> Self {
        Self {
            nodes,
            objects,
            root_folder: storage.root_folder.trim_end_matches('/').to_string(),
            max_upload_bytes: storage.max_upload_size_bytes,
        }
    }

    /// Lists the non-deleted children of `parent_id`, or the root level.
    ///
    /// A named parent must be visible to the caller; it need not be a folder.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Node>> {
        if let Some(parent_id) = parent_id {
            require_owned(&ctx.owner_id, self.nodes.find_by_id(parent_id).await?)?;
        }

        self.nodes.find_children(&ctx.owner_id, parent_id).await
    }

    /// Lists the caller's starred, non-deleted nodes.
    pub async fn list_starred(&self, ctx: &RequestContext) -> AppResult<Vec<Node>> {
        self.nodes.find_starred(&ctx.owner_id).await
    }

    /// Lists the caller's deleted nodes.
    pub async fn list_trash(&self, ctx: &RequestContext) -> AppResult<Vec<Node>> {
        self.nodes.find_deleted(&ctx.owner_id).await
    }

    /// Gets one node, deleted or not.
    pub async fn get_node(&self, ctx: &RequestContext, node_id: Uuid) -> AppResult<Node> {
        require_owned(&ctx.owner_id, self.nodes.find_by_id(node_id).await?)
    }

    /// Creates a folder at the root level or inside an owned folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Node> {
        let record = NewNode::folder(ctx.owner_id.clone(), name, parent_id)?;

        if let Some(parent_id) = parent_id {
            resolve_parent_folder(&ctx.owner_id, self.nodes.find_by_id(parent_id).await?)?;
        }

        let folder = self.nodes.insert(&record).await?;

        info!(
            owner_id = %ctx.owner_id,
            node_id = %folder.id,
            parent_id = ?folder.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Uploads a file into an owned folder.
    ///
    /// Every check runs before the object store is called. If the store
    /// accepts the bytes but the row cannot be written, the object is
    /// removed again on a best-effort basis and the insert error returned.
    pub async fn create_file(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
        upload: UploadedFile,
        data: Bytes,
    ) -> AppResult<Node> {
        let parent_id =
            parent_id.ok_or_else(|| AppError::invalid_parent("Parent folder is required"))?;
        // Ownership is settled before anything about the payload is reported.
        let parent =
            resolve_parent_folder(&ctx.owner_id, self.nodes.find_by_id(parent_id).await?)?;

        let kind = upload.validate()?;
        if data.len() as u64 > self.max_upload_bytes {
            return Err(AppError::payload_too_large(format!(
                "File exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }

        let folder = format!("{}/{}/folder/{}", self.root_folder, ctx.owner_id, parent.id);
        let file_name = upload.storage_name();
        let stored = self.objects.store(data, &folder, &file_name).await?;

        debug!(
            owner_id = %ctx.owner_id,
            object_id = %stored.object_id,
            path = %stored.stored_path,
            kind = ?kind,
            "Object stored"
        );

        let record = NewNode::file(ctx.owner_id.clone(), parent.id, &upload, &stored)?;
        let file = match self.nodes.insert(&record).await {
            Ok(file) => file,
            Err(e) => {
                error!(
                    owner_id = %ctx.owner_id,
                    object_id = %stored.object_id,
                    error = %e,
                    "Failed to record uploaded file, removing object"
                );
                if let Err(remove_err) = self.objects.remove(&stored.object_id).await {
                    warn!(
                        object_id = %stored.object_id,
                        error = %remove_err,
                        "Failed to remove orphaned object"
                    );
                }
                return Err(e);
            }
        };

        info!(
            owner_id = %ctx.owner_id,
            node_id = %file.id,
            parent_id = %parent.id,
            size = file.size,
            mime_type = %file.node_type,
            "File uploaded"
        );

        Ok(file)
    }

    /// Flips the starred flag of an owned node.
    pub async fn toggle_star(&self, ctx: &RequestContext, node_id: Uuid) -> AppResult<Node> {
        let node = self.toggle(ctx, node_id, ToggleField::Starred).await?;
        info!(
            owner_id = %ctx.owner_id,
            node_id = %node.id,
            starred = node.is_starred,
            "Star toggled"
        );
        Ok(node)
    }

    /// Moves an owned node between Active and Deleted. Children are untouched.
    pub async fn toggle_deleted(&self, ctx: &RequestContext, node_id: Uuid) -> AppResult<Node> {
        let node = self.toggle(ctx, node_id, ToggleField::Deleted).await?;
        info!(
            owner_id = %ctx.owner_id,
            node_id = %node.id,
            state = ?node.deletion_state(),
            "Deletion toggled"
        );
        Ok(node)
    }

    /// Read the flag, then write its negation only if nobody changed it
    /// in between. Retries with a fresh read when the write matches no row.
    async fn toggle(
        &self,
        ctx: &RequestContext,
        node_id: Uuid,
        field: ToggleField,
    ) -> AppResult<Node> {
        for attempt in 1..=TOGGLE_ATTEMPTS {
            let node = require_owned(&ctx.owner_id, self.nodes.find_by_id(node_id).await?)?;
            let new_value = match field {
                ToggleField::Starred => !node.is_starred,
                ToggleField::Deleted => node.deletion_state().toggle().is_deleted(),
            };

            if let Some(updated) = self
                .nodes
                .compare_and_set(&ctx.owner_id, node_id, field, new_value)
                .await?
            {
                return Ok(updated);
            }

            debug!(
                node_id = %node_id,
                column = field.column(),
                attempt,
                "Toggle lost a concurrent update, retrying"
            );
        }

        warn!(node_id = %node_id, column = field.column(), "Toggle retries exhausted");
        Err(AppError::conflict(
            "The file was modified concurrently, please retry",
        ))
    }
}
