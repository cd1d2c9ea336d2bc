//! Token authentication use case.
//!
//! Thin boundary over the verifier whose job is reclassification: every
//! lower-level failure is mapped into the closed [`AuthError`] set here,
//! exactly once, so downstream authorization logic never branches on
//! resolver or verifier internals.

use crate::auth::jwks::KeyResolutionError;
use crate::auth::verifier::{TokenVerifier, VerifyError};
use crate::auth::TokenClaims;
use crate::errors::AuthError;
use tracing::instrument;

/// Authenticates bearer tokens and classifies the outcome.
pub struct AuthenticationService {
    verifier: TokenVerifier,
}

impl AuthenticationService {
    /// Create the use case over a verifier.
    #[must_use]
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Authenticate a bearer token.
    ///
    /// # Errors
    ///
    /// Inner failures reclassify as:
    ///
    /// - key not found during resolution → [`AuthError::InvalidToken`]
    /// - malformed token → [`AuthError::MalformedToken`]
    /// - token expired → [`AuthError::TokenExpired`]
    /// - bad signature / claim mismatch → [`AuthError::InvalidToken`]
    /// - any other failure (network, unexpected) →
    ///   [`AuthError::ExternalService`]
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verifier.verify(token).await.map_err(|e| {
            tracing::debug!(
                target: "authorizer.services.authentication",
                error = %e,
                "Authentication failed"
            );
            match e {
                VerifyError::Malformed => AuthError::MalformedToken,
                VerifyError::Expired => AuthError::TokenExpired,
                VerifyError::Invalid
                | VerifyError::Resolution(KeyResolutionError::NotFound(_)) => {
                    AuthError::InvalidToken
                }
                VerifyError::Resolution(KeyResolutionError::Lookup(reason)) => {
                    AuthError::ExternalService(reason)
                }
            }
        })
    }
}
