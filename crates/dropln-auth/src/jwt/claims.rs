//! Session token claims.

use serde::{Deserialize, Serialize};

/// Claims carried by the identity provider's session tokens.
///
/// Only the fields Dropln relies on are modelled; unknown claims are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the owner ID.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuer, when the provider sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Provider session ID, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}
