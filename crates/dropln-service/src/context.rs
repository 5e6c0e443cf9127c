//! Request context carrying the authenticated owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropln_core::types::OwnerId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer once the bearer token has been resolved and
/// passed into every service method, so each operation knows *who* is
/// acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated owner.
    pub owner_id: OwnerId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            request_time: Utc::now(),
        }
    }
}
