//! # dropln-service
//!
//! Business logic for Dropln. The tree service orchestrates the node
//! repository, the object store and the ownership rules to implement the
//! file-tree use cases.
//!
//! Services take every collaborator as an `Arc` at construction.

pub mod context;
pub mod tree;

pub use context::RequestContext;
pub use tree::TreeService;
