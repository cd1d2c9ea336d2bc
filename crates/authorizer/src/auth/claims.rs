//! Verified token claims.
//!
//! Contains the claim set extracted from a token that has passed signature
//! and claim verification. Nothing constructs this type before
//! verification succeeds; from here on the claims are trusted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim set of a verified access token.
///
/// The `sub` field carries the end-user or client identifier and is
/// redacted in Debug output to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Audience the token was issued for.
    pub aud: String,

    /// Authorized party (client ID); absent on some grant types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Grant type (e.g. "client-credentials"); absent on some grant types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gty: Option<String>,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Issuer URL of the identity provider.
    pub iss: String,

    /// Subject (user or client identifier) - redacted in Debug output.
    pub sub: String,
}

impl fmt::Debug for TokenClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenClaims")
            .field("aud", &self.aud)
            .field("azp", &self.azp)
            .field("exp", &self.exp)
            .field("gty", &self.gty)
            .field("iat", &self.iat)
            .field("iss", &self.iss)
            .field("sub", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            aud: "https://api.example.com".to_string(),
            azp: Some("client-abc".to_string()),
            exp: 1_234_567_890,
            gty: Some("client-credentials".to_string()),
            iat: 1_234_567_800,
            iss: "https://tenant.example.auth0.com/".to_string(),
            sub: "auth0|secret-user-id".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_sub() {
        let debug_str = format!("{:?}", sample_claims());

        assert!(
            !debug_str.contains("secret-user-id"),
            "Debug output should not contain actual sub value"
        );
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let claims = sample_claims();
        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: TokenClaims = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.aud, claims.aud);
        assert_eq!(deserialized.azp, claims.azp);
        assert_eq!(deserialized.exp, claims.exp);
        assert_eq!(deserialized.gty, claims.gty);
        assert_eq!(deserialized.iat, claims.iat);
        assert_eq!(deserialized.iss, claims.iss);
        assert_eq!(deserialized.sub, claims.sub);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let json = r#"{
            "aud": "https://api.example.com",
            "exp": 1234567890,
            "iat": 1234567800,
            "iss": "https://tenant.example.auth0.com/",
            "sub": "user-1"
        }"#;

        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert!(claims.azp.is_none());
        assert!(claims.gty.is_none());
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let claims = TokenClaims {
            azp: None,
            gty: None,
            ..sample_claims()
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("azp"));
        assert!(!json.contains("gty"));
    }
}
