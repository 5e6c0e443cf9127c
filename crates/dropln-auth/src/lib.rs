//! # dropln-auth
//!
//! Caller identity and access rules for Dropln.
//!
//! ## Modules
//!
//! - `jwt`: bearer token validation against the identity provider's key,
//!   and token minting for development and tests
//! - `ownership`: the single owner-visibility rule applied to every node
//!   read or mutation

pub mod jwt;
pub mod ownership;

pub use jwt::{Claims, JwtEncoder, JwtIdentityProvider};
pub use ownership::{assert_owns, require_owned, resolve_parent_folder};
