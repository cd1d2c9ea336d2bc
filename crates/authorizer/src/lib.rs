//! Gateway Token Authorizer Library
//!
//! Authenticates bearer tokens presented to an API gateway by validating
//! them against the identity provider's published signing keys, and maps
//! the outcome to an allow/deny policy decision for the routing layer.
//!
//! # Architecture
//!
//! The authorizer follows the Handler -> Service -> Infrastructure pattern:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/*.rs -> auth/*.rs -> cache/
//! ```
//!
//! Control flow per request: extract the bearer token from the raw header,
//! decode its unverified `kid`, resolve the matching signing key
//! (cache-then-network), verify signature and claims, then build the
//! policy decision.
//!
//! # Modules
//!
//! - `auth` - key lookup, key resolution, token verification
//! - `cache` - signing-key cache boundary
//! - `config` - service configuration from environment
//! - `errors` - the closed authentication-outcome taxonomy
//! - `handlers` - HTTP request handlers
//! - `models` - gateway wire contract (request / policy decision)
//! - `notify` - fire-and-forget failure notification
//! - `routes` - Axum router setup
//! - `services` - authentication use case and decision builder

pub mod auth;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod routes;
pub mod services;
