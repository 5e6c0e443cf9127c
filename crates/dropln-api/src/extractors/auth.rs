//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, resolves it through the identity provider, and injects context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use dropln_core::error::AppError;
use dropln_core::result::AppResult;
use dropln_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Reject a request that names a different owner than the caller.
    ///
    /// An absent or empty value is accepted.
    pub fn ensure_same_owner(&self, claimed: Option<&str>) -> AppResult<()> {
        match claimed.map(str::trim) {
            Some(claimed) if !claimed.is_empty() && claimed != self.0.owner_id.as_str() => Err(
                AppError::unauthorized("userId does not match the authenticated user"),
            ),
            _ => Ok(()),
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))?;

        let owner_id = state.identity.authenticate(token).await?;

        Ok(AuthUser(RequestContext::new(owner_id)))
    }
}
