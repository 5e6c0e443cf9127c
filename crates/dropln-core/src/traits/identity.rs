//! Identity provider trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::OwnerId;

/// Resolves a caller credential into a stable owner identifier.
///
/// Implementations return an `Unauthenticated` error for missing, expired,
/// or otherwise invalid credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Authenticate a bearer token.
    async fn authenticate(&self, token: &str) -> AppResult<OwnerId>;
}
