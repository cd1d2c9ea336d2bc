//! Normalized signing keys and cache-aside resolution.
//!
//! A [`SigningKey`] is the single textual public-key document shared by the
//! cache and the verifier: what gets stored under a `kid` is byte-for-byte
//! what verification later consumes. Component-shaped provider keys
//! normalize to a minimal JWK JSON document; certificate-shaped keys to a
//! PEM-armored certificate.

use crate::auth::jwks::{JwksClient, KeyResolutionError};
use crate::cache::KeyCache;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Key material that could not be turned back into a verification key.
#[derive(Debug, Error)]
#[error("unusable signing key material: {0}")]
pub struct KeyMaterialError(String);

/// Normalized textual representation of a provider public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey(String);

/// Minimal JWK document stored for component-shaped keys.
#[derive(Deserialize)]
struct RsaComponents {
    n: String,
    e: String,
}

impl SigningKey {
    /// Wrap an already-PEM-formatted key document.
    pub fn from_pem(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Normalize an RSA-components key (`n`/`e`, base64url) into its
    /// textual document.
    #[must_use]
    pub fn from_rsa_components(n: &str, e: &str) -> Self {
        Self(serde_json::json!({ "kty": "RSA", "n": n, "e": e }).to_string())
    }

    /// Normalize a base64 DER certificate into a PEM-armored document.
    #[must_use]
    pub fn from_certificate_der(der_b64: &str) -> Self {
        let body = der_b64
            .chars()
            .collect::<Vec<_>>()
            .chunks(64)
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        Self(format!(
            "-----BEGIN CERTIFICATE-----\n{body}\n-----END CERTIFICATE-----\n"
        ))
    }

    /// The textual document exactly as cached.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the verification key from this document.
    ///
    /// # Errors
    ///
    /// Returns [`KeyMaterialError`] when the document is neither a loadable
    /// PEM nor a component JWK, or the material itself is invalid.
    pub fn decoding_key(&self) -> Result<DecodingKey, KeyMaterialError> {
        if self.0.starts_with("-----BEGIN") {
            return DecodingKey::from_rsa_pem(self.0.as_bytes())
                .map_err(|e| KeyMaterialError(e.to_string()));
        }

        let components: RsaComponents =
            serde_json::from_str(&self.0).map_err(|e| KeyMaterialError(e.to_string()))?;
        DecodingKey::from_rsa_components(&components.n, &components.e)
            .map_err(|e| KeyMaterialError(e.to_string()))
    }
}

/// Cache-aside resolution of signing keys by identifier.
///
/// Cache first; on a miss, one lookup against the provider, then a
/// best-effort write back. No retries at any stage.
pub struct KeyResolver {
    cache: Arc<dyn KeyCache>,
    provider: JwksClient,
}

impl KeyResolver {
    /// Create a resolver over a cache handle and a provider client.
    #[must_use]
    pub fn new(cache: Arc<dyn KeyCache>, provider: JwksClient) -> Self {
        Self { cache, provider }
    }

    /// Resolve the signing key for `kid`.
    ///
    /// A cache hit returns immediately with no network call. On a miss the
    /// provider is queried once and the result is cached; a cache-write
    /// failure is logged and ignored because the freshly fetched key is
    /// still usable for the current request.
    ///
    /// # Errors
    ///
    /// Propagates [`KeyResolutionError`] from the provider lookup.
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn resolve(&self, kid: &str) -> Result<SigningKey, KeyResolutionError> {
        if let Some(key) = self.cache.get(kid).await {
            return Ok(key);
        }

        let key = self.provider.fetch_key(kid).await?;

        if let Err(e) = self.cache.put(kid, &key).await {
            tracing::warn!(
                target: "authorizer.auth.keys",
                kid = %kid,
                error = %e,
                "Failed to cache resolved signing key"
            );
        }

        Ok(key)
    }
}
