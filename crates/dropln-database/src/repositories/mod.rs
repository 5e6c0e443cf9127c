//! Node repository trait and its implementations.

pub mod memory;
pub mod node;

use async_trait::async_trait;
use uuid::Uuid;

use dropln_core::result::AppResult;
use dropln_core::types::OwnerId;
use dropln_entity::node::{NewNode, Node};

pub use memory::MemoryNodeRepository;
pub use node::PgNodeRepository;

/// Boolean columns that can be flipped after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    /// `is_starred`.
    Starred,
    /// `is_deleted`.
    Deleted,
}

impl ToggleField {
    /// Column name in the `files` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Starred => "is_starred",
            Self::Deleted => "is_deleted",
        }
    }

    /// Read the field from a node.
    pub fn get(&self, node: &Node) -> bool {
        match self {
            Self::Starred => node.is_starred,
            Self::Deleted => node.is_deleted,
        }
    }
}

/// Persistence operations on the `files` table.
///
/// Listing methods are scoped to one owner. Single-row reads are not, so
/// that the caller can apply one ownership rule in one place.
#[async_trait]
pub trait NodeRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a node by ID regardless of owner or deletion state.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>>;

    /// Non-deleted nodes of `owner` whose parent is `parent_id`
    /// (`None` = root level). Folders first, then by name.
    async fn find_children(&self, owner: &OwnerId, parent_id: Option<Uuid>)
    -> AppResult<Vec<Node>>;

    /// Non-deleted starred nodes of `owner`.
    async fn find_starred(&self, owner: &OwnerId) -> AppResult<Vec<Node>>;

    /// Deleted nodes of `owner`, most recently changed first.
    async fn find_deleted(&self, owner: &OwnerId) -> AppResult<Vec<Node>>;

    /// Insert a new node and return the stored row.
    async fn insert(&self, node: &NewNode) -> AppResult<Node>;

    /// Set `field` to `new_value` only if it currently equals `!new_value`.
    ///
    /// Returns `None` when no row matched: the node is gone, belongs to
    /// someone else, or a concurrent writer flipped it first.
    async fn compare_and_set(
        &self,
        owner: &OwnerId,
        id: Uuid,
        field: ToggleField,
        new_value: bool,
    ) -> AppResult<Option<Node>>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
