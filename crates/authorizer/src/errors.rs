//! Authorizer error types.
//!
//! [`AuthError`] is the closed outcome set every lower-level failure is
//! reclassified into before it crosses the use-case boundary. Messages
//! returned to clients are intentionally generic; actual causes are logged
//! server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Authentication outcome taxonomy.
///
/// Downstream authorization logic branches on exactly this set rather than
/// on every possible low-level fault.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Token is structurally undecodable.
    #[error("Malformed token")]
    MalformedToken,

    /// Token verified structurally but its expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// Bad signature, claim mismatch, or no key published for the token.
    #[error("Invalid token")]
    InvalidToken,

    /// Inbound Authorization header does not carry a bearer token. This is
    /// a hard reject raised before any authentication runs.
    #[error("Invalid authorization header")]
    InvalidAuthHeader,

    /// Catch-all for unexpected infrastructure faults (provider
    /// unreachable, unexpected errors). Never produces a policy.
    #[error("External service failure: {0}")]
    ExternalService(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::InvalidAuthHeader => 401,
            AuthError::ExternalService(_) => 503,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthError::InvalidAuthHeader => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTH_HEADER",
                "Missing or invalid Authorization header".to_string(),
            ),
            AuthError::MalformedToken | AuthError::TokenExpired | AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "The access token is invalid or expired".to_string(),
            ),
            AuthError::ExternalService(reason) => {
                // Log actual reason server-side, return generic message
                tracing::warn!(target: "authorizer.availability", reason = %reason, "External service failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service temporarily unavailable".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) =
                "Bearer realm=\"gateway-authorizer\", error=\"invalid_token\"".parse()
            {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display_variants() {
        assert_eq!(format!("{}", AuthError::MalformedToken), "Malformed token");
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token expired");
        assert_eq!(format!("{}", AuthError::InvalidToken), "Invalid token");
        assert_eq!(
            format!("{}", AuthError::InvalidAuthHeader),
            "Invalid authorization header"
        );
        assert_eq!(
            format!("{}", AuthError::ExternalService("boom".to_string())),
            "External service failure: boom"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MalformedToken.status_code(), 401);
        assert_eq!(AuthError::TokenExpired.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 401);
        assert_eq!(AuthError::InvalidAuthHeader.status_code(), 401);
        assert_eq!(
            AuthError::ExternalService("x".to_string()).status_code(),
            503
        );
    }

    #[tokio::test]
    async fn test_into_response_invalid_auth_header() {
        let response = AuthError::InvalidAuthHeader.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let www_auth = response.headers().get("WWW-Authenticate");
        assert!(www_auth.is_some());
        assert!(www_auth
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Bearer realm=\"gateway-authorizer\""));

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "INVALID_AUTH_HEADER");
    }

    #[tokio::test]
    async fn test_into_response_external_service_is_generic() {
        let response =
            AuthError::ExternalService("provider connection refused".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "SERVICE_UNAVAILABLE");
        // Real cause is logged, not returned
        assert_eq!(
            body_json["error"]["message"],
            "Service temporarily unavailable"
        );
    }

    #[tokio::test]
    async fn test_into_response_token_errors_do_not_leak_detail() {
        for err in [
            AuthError::MalformedToken,
            AuthError::TokenExpired,
            AuthError::InvalidToken,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_json = read_body_json(response.into_body()).await;
            assert_eq!(body_json["error"]["code"], "INVALID_TOKEN");
            assert_eq!(
                body_json["error"]["message"],
                "The access token is invalid or expired"
            );
        }
    }
}
