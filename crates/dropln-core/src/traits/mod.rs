//! Collaborator traits defined in `dropln-core` and implemented by other crates.

pub mod identity;
pub mod storage;

pub use identity::IdentityProvider;
pub use storage::{ObjectStore, StoredObject};
