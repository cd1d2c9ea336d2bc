//! Authorization decision building.
//!
//! Entry-point orchestration: extract the bearer token from the raw
//! Authorization header, authenticate it, and turn the outcome into a
//! policy decision. Only expired/invalid outcomes become deny policies
//! (the gateway can attach a custom message to a deny and to nothing
//! else); a bad header is a hard reject and infrastructure faults
//! propagate without a crafted policy.

use crate::errors::AuthError;
use crate::models::AuthorizerDecision;
use crate::notify::{self, FailureNotifier};
use crate::services::authentication::AuthenticationService;
use std::sync::Arc;
use tracing::instrument;

/// Client-facing message on deny-for-expiry decisions.
pub const DENY_EXPIRED_MESSAGE: &str = "token expired";

/// Client-facing message on deny-for-invalid decisions.
pub const DENY_INVALID_MESSAGE: &str = "token invalid";

/// Builds authorization decisions from raw gateway requests.
pub struct DecisionService {
    authentication: AuthenticationService,
    notifier: Arc<dyn FailureNotifier>,
}

impl DecisionService {
    /// Create the decision builder.
    #[must_use]
    pub fn new(authentication: AuthenticationService, notifier: Arc<dyn FailureNotifier>) -> Self {
        Self {
            authentication,
            notifier,
        }
    }

    /// Produce an authorization decision for a raw header value and a
    /// requested resource.
    ///
    /// - verified token → allow policy, principal = token subject
    /// - expired token → deny policy, message [`DENY_EXPIRED_MESSAGE`]
    /// - malformed/invalid token → deny policy, message
    ///   [`DENY_INVALID_MESSAGE`]
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidAuthHeader`] - header does not match
    ///   `Bearer <token>`; the caller must reject as unauthenticated
    /// - [`AuthError::ExternalService`] - unrecoverable fault; no decision
    ///   can be crafted
    #[instrument(skip_all, fields(method_arn = %method_arn))]
    pub async fn authorize(
        &self,
        authorization_header: &str,
        method_arn: &str,
    ) -> Result<AuthorizerDecision, AuthError> {
        let outcome = match extract_bearer(authorization_header) {
            Ok(token) => self.authentication.authenticate(token).await,
            Err(e) => Err(e),
        };

        let claims = match outcome {
            Ok(claims) => claims,
            Err(error) => {
                // Observability side effect on every failure path, before
                // classification; detached so it can never block or fail
                // the decision
                notify::dispatch(&self.notifier, &error, authorization_header);

                return match error {
                    AuthError::TokenExpired => {
                        Ok(AuthorizerDecision::deny(DENY_EXPIRED_MESSAGE))
                    }
                    AuthError::MalformedToken | AuthError::InvalidToken => {
                        Ok(AuthorizerDecision::deny(DENY_INVALID_MESSAGE))
                    }
                    other => Err(other),
                };
            }
        };

        tracing::debug!(target: "authorizer.services.decision", "Authorization allowed");
        Ok(AuthorizerDecision::allow(&claims.sub, method_arn))
    }
}

/// Extract the token body from a `Bearer <token>` header value.
///
/// # Errors
///
/// Returns [`AuthError::InvalidAuthHeader`] when the header does not carry
/// a non-empty bearer token.
fn extract_bearer(authorization_header: &str) -> Result<&str, AuthError> {
    authorization_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!(
                target: "authorizer.services.decision",
                "Authorization header does not match Bearer scheme"
            );
            AuthError::InvalidAuthHeader
        })
}
