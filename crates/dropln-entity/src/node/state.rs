//! Soft-delete state machine.

use serde::{Deserialize, Serialize};

/// Soft-delete state of a node.
///
/// Stored as the `is_deleted` boolean; the only transition is
/// [`DeletionState::toggle`], which moves Active to Deleted and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionState {
    /// Visible in default listings.
    Active,
    /// Hidden from default listings, kept in the table.
    Deleted,
}

impl DeletionState {
    /// Map the persisted flag to a state.
    pub fn from_flag(is_deleted: bool) -> Self {
        if is_deleted { Self::Deleted } else { Self::Active }
    }

    /// The persisted flag for this state.
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// The state reached by the delete-toggle operation.
    pub fn toggle(self) -> Self {
        match self {
            Self::Active => Self::Deleted,
            Self::Deleted => Self::Active,
        }
    }
}
