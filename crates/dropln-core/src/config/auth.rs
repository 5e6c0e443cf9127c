//! Identity provider token configuration.

use serde::{Deserialize, Serialize};

/// Signature algorithm of the session tokens issued by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC-SHA256 with a shared secret.
    Hs256,
    /// RSA-SHA256 with the provider's public key.
    Rs256,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token signature algorithm.
    #[serde(default = "default_algorithm")]
    pub algorithm: JwtAlgorithm,
    /// Shared secret for HS256.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// PEM-encoded public key for RS256.
    #[serde(default)]
    pub jwt_public_key_pem: String,
    /// Expected `iss` claim; not checked when empty.
    #[serde(default)]
    pub issuer: String,
    /// Allowed clock skew in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Lifetime of development tokens minted by the CLI, in minutes.
    #[serde(default = "default_dev_token_ttl")]
    pub dev_token_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            jwt_secret: default_jwt_secret(),
            jwt_public_key_pem: String::new(),
            issuer: String::new(),
            leeway_seconds: default_leeway(),
            dev_token_ttl_minutes: default_dev_token_ttl(),
        }
    }
}

fn default_algorithm() -> JwtAlgorithm {
    JwtAlgorithm::Hs256
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}

fn default_dev_token_ttl() -> u64 {
    60
}
