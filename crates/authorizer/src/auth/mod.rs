//! Token authentication: claims, remote key lookup, key resolution, and
//! verification.

pub mod claims;
pub mod jwks;
pub mod keys;
pub mod verifier;

pub use claims::TokenClaims;
pub use verifier::{ExpectedClaims, TokenVerifier};
