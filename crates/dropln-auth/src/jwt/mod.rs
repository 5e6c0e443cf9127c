//! JWT claims, validation and minting.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtIdentityProvider;
pub use encoder::JwtEncoder;
