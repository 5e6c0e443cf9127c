//! # dropln-storage
//!
//! Object store implementations for Dropln. File bytes live in an external
//! media service (ImageKit) in production, or in a local directory or
//! process memory for development and tests.

pub mod factory;
pub mod providers;

pub use factory::build_object_store;
pub use providers::imagekit::ImageKitObjectStore;
pub use providers::local::LocalObjectStore;
pub use providers::memory::MemoryObjectStore;
