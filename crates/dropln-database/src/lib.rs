//! # dropln-database
//!
//! PostgreSQL connection management and the node repositories. The
//! [`repositories::NodeRepository`] trait is implemented for PostgreSQL and
//! for an in-process map used by tests and `memory://` deployments.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::{MemoryNodeRepository, NodeRepository, PgNodeRepository, ToggleField};
