//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dropln_core::config::AppConfig;
use dropln_core::traits::identity::IdentityProvider;
use dropln_core::traits::storage::ObjectStore;
use dropln_database::repositories::NodeRepository;
use dropln_service::tree::TreeService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Node repository (PostgreSQL or in-memory)
    pub nodes: Arc<dyn NodeRepository>,
    /// Object store for file bytes
    pub objects: Arc<dyn ObjectStore>,
    /// Bearer token validator
    pub identity: Arc<dyn IdentityProvider>,
    /// File tree service
    pub tree_service: Arc<TreeService>,
}

impl AppState {
    /// Wires the tree service from its collaborators.
    pub fn new(
        config: AppConfig,
        nodes: Arc<dyn NodeRepository>,
        objects: Arc<dyn ObjectStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let tree_service = Arc::new(TreeService::new(
            Arc::clone(&nodes),
            Arc::clone(&objects),
            &config.storage,
        ));

        Self {
            config: Arc::new(config),
            nodes,
            objects,
            identity,
            tree_service,
        }
    }
}
