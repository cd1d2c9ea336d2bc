//! JWT utilities shared across authorizer components.
//!
//! This module provides the pre-verification half of token handling:
//! - Size limits for DoS prevention
//! - Key ID extraction from JWT headers
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Nothing decoded here is trusted; the header is read without any
//!   signature verification and is only used to select a signing key

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

/// Maximum allowed JWT size in bytes (8KB).
///
/// Tokens larger than this are rejected BEFORE any base64 decode or JSON
/// parsing, bounding the work an unauthenticated caller can cause.
/// Typical provider-issued access tokens are well under 2KB.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Errors that can occur while decoding the unverified token header.
///
/// Note: error messages are intentionally generic to prevent information
/// leakage. Detailed information is logged at debug level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token format is invalid (not a valid JWT structure).
    #[error("The access token is invalid or expired")]
    MalformedToken,

    /// Token is missing required `kid` header.
    #[error("The access token is invalid or expired")]
    MissingKid,
}

/// Extract the `kid` (key ID) from a JWT header without verifying the signature.
///
/// The `kid` names which of the provider's published public keys signed the
/// token and is used to look up that key for verification.
///
/// # Security
///
/// - Token size is checked BEFORE any parsing
/// - This function does NOT validate the token signature; the token MUST
///   still be verified against the resolved key
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` - token is not a three-segment JWT, or the header
///   segment is not valid base64url/JSON
/// - `MissingKid` - header has no `kid` field, or `kid` is not a non-empty
///   string
pub fn extract_kid(token: &str) -> Result<String, JwtValidationError> {
    // Check token size first (DoS prevention)
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts = parts.len(),
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    }

    let header_part = parts.first().ok_or(JwtValidationError::MalformedToken)?;
    let header_bytes = URL_SAFE_NO_PAD.decode(header_part).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT header base64");
        JwtValidationError::MalformedToken
    })?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT header JSON");
        JwtValidationError::MalformedToken
    })?;

    // Extract kid as string, rejecting empty values
    let kid = header
        .get("kid")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or(JwtValidationError::MissingKid)?;

    Ok(kid)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_max_jwt_size_is_8kb() {
        assert_eq!(MAX_JWT_SIZE_BYTES, 8192);
    }

    #[test]
    fn test_extract_kid_valid_token() {
        let header = r#"{"alg":"RS256","typ":"JWT","kid":"test-key-01"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "test-key-01");
    }

    #[test]
    fn test_extract_kid_missing_kid() {
        let header = r#"{"alg":"RS256","typ":"JWT"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(matches!(result, Err(JwtValidationError::MissingKid)));
    }

    #[test]
    fn test_extract_kid_malformed_token() {
        assert!(matches!(
            extract_kid("not-a-jwt"),
            Err(JwtValidationError::MalformedToken)
        ));
        assert!(matches!(
            extract_kid("only.two"),
            Err(JwtValidationError::MalformedToken)
        ));
        assert!(matches!(
            extract_kid("too.many.dot.segments"),
            Err(JwtValidationError::MalformedToken)
        ));
    }

    #[test]
    fn test_extract_kid_empty_token() {
        let result = extract_kid("");
        assert!(matches!(result, Err(JwtValidationError::MalformedToken)));
    }

    #[test]
    fn test_extract_kid_invalid_base64() {
        let result = extract_kid("!!!invalid!!!.payload.signature");
        assert!(matches!(result, Err(JwtValidationError::MalformedToken)));
    }

    #[test]
    fn test_extract_kid_invalid_json() {
        let header_b64 = URL_SAFE_NO_PAD.encode("not-json");
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(matches!(result, Err(JwtValidationError::MalformedToken)));
    }

    #[test]
    fn test_extract_kid_oversized_token() {
        let oversized = "a".repeat(MAX_JWT_SIZE_BYTES + 1);
        let result = extract_kid(&oversized);
        assert!(matches!(result, Err(JwtValidationError::TokenTooLarge)));
    }

    #[test]
    fn test_extract_kid_at_size_limit() {
        let header = r#"{"alg":"RS256","typ":"JWT","kid":"key"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let remaining = MAX_JWT_SIZE_BYTES - header_b64.len() - 2; // -2 for two dots
        let payload_len = remaining / 2;
        let sig_len = remaining - payload_len;
        let token = format!(
            "{}.{}.{}",
            header_b64,
            "a".repeat(payload_len),
            "b".repeat(sig_len)
        );

        assert_eq!(token.len(), MAX_JWT_SIZE_BYTES);

        let result = extract_kid(&token);
        assert!(result.is_ok(), "Token at size limit should be accepted");
        assert_eq!(result.unwrap(), "key");
    }

    #[test]
    fn test_extract_kid_non_string_kid() {
        let header = r#"{"alg":"RS256","typ":"JWT","kid":12345}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(matches!(result, Err(JwtValidationError::MissingKid)));
    }

    #[test]
    fn test_extract_kid_empty_string_kid() {
        let header = r#"{"alg":"RS256","typ":"JWT","kid":""}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(matches!(result, Err(JwtValidationError::MissingKid)));
    }

    #[test]
    fn test_extract_kid_with_special_characters() {
        let header = r#"{"alg":"RS256","typ":"JWT","kid":"key-with-special_chars.123"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert_eq!(result.unwrap(), "key-with-special_chars.123");
    }
}
