//! PostgreSQL node repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use dropln_core::error::{AppError, ErrorKind};
use dropln_core::result::AppResult;
use dropln_core::types::OwnerId;
use dropln_entity::node::{NewNode, Node};

use super::{NodeRepository, ToggleField};

/// Foreign key on `files.parent_id`.
const PARENT_FK: &str = "files_parent_id_fkey";

/// Repository for node CRUD and listing queries.
#[derive(Debug, Clone)]
pub struct PgNodeRepository {
    pool: PgPool,
}

impl PgNodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NodeRepository for PgNodeRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find node", e))
    }

    async fn find_children(
        &self,
        owner: &OwnerId,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Node>> {
        let query = match parent_id {
            Some(parent_id) => sqlx::query_as::<_, Node>(
                "SELECT * FROM files \
                 WHERE user_id = $1 AND parent_id = $2 AND is_deleted = FALSE \
                 ORDER BY is_folder DESC, name ASC",
            )
            .bind(owner)
            .bind(parent_id),
            None => sqlx::query_as::<_, Node>(
                "SELECT * FROM files \
                 WHERE user_id = $1 AND parent_id IS NULL AND is_deleted = FALSE \
                 ORDER BY is_folder DESC, name ASC",
            )
            .bind(owner),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_starred(&self, owner: &OwnerId) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM files \
             WHERE user_id = $1 AND is_starred = TRUE AND is_deleted = FALSE \
             ORDER BY is_folder DESC, name ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list starred", e))
    }

    async fn find_deleted(&self, owner: &OwnerId) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM files WHERE user_id = $1 AND is_deleted = TRUE \
             ORDER BY updated_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list trash", e))
    }

    async fn insert(&self, node: &NewNode) -> AppResult<Node> {
        sqlx::query_as::<_, Node>(
            "INSERT INTO files \
             (id, name, path, size, type, file_url, thumbnail_url, user_id, parent_id, is_folder) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(node.id)
        .bind(&node.name)
        .bind(&node.path)
        .bind(node.size)
        .bind(&node.node_type)
        .bind(&node.file_url)
        .bind(&node.thumbnail_url)
        .bind(&node.user_id)
        .bind(node.parent_id)
        .bind(node.is_folder)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PARENT_FK) => {
                AppError::invalid_parent("Invalid parent folder")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert node", e),
        })
    }

    async fn compare_and_set(
        &self,
        owner: &OwnerId,
        id: Uuid,
        field: ToggleField,
        new_value: bool,
    ) -> AppResult<Option<Node>> {
        let column = field.column();
        let sql = format!(
            "UPDATE files SET {column} = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND {column} = $4 RETURNING *"
        );

        let updated = sqlx::query_as::<_, Node>(&sql)
            .bind(id)
            .bind(owner)
            .bind(new_value)
            .bind(!new_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update node", e))?;

        debug!(node_id = %id, column, matched = updated.is_some(), "Conditional update");
        Ok(updated)
    }

    async fn health_check(&self) -> AppResult<bool> {
        crate::connection::ping(&self.pool).await.map(|_| true)
    }
}
