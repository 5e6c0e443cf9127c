//! Node (file or folder) domain entities.

pub mod mime;
pub mod model;
pub mod state;

pub use mime::SupportedType;
pub use model::{FOLDER_TYPE, NewNode, Node, UploadedFile};
pub use state::DeletionState;
