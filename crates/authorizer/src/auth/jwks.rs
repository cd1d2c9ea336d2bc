//! Remote key lookup against the identity provider's JWKS endpoint.
//!
//! The provider publishes its signing keys at a per-tenant well-known URI
//! (`https://<domain>/.well-known/jwks.json`). Each published entry carries
//! its key material in one of two shapes: RSA components (`n`/`e`) or an
//! X.509 certificate chain (`x5c`). Either shape normalizes into a single
//! textual [`SigningKey`].
//!
//! # Security
//!
//! - HTTPS should be used in production (enforced by deployment config)
//! - Nothing here verifies tokens; a fetched key is only trustworthy
//!   because the JWKS URI itself is

use crate::auth::keys::SigningKey;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

/// Errors from resolving a signing key by identifier.
#[derive(Debug, Error)]
pub enum KeyResolutionError {
    /// The provider responded, but published no usable key for this `kid`.
    #[error("no signing key published for kid {0}")]
    NotFound(String),

    /// The provider's endpoint was unreachable, errored, or returned an
    /// undecodable body.
    #[error("key lookup failed: {0}")]
    Lookup(String),
}

/// JSON Web Key from the JWKS endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type (e.g. "RSA").
    pub kty: String,

    /// Key ID - used to select the correct key for verification.
    pub kid: String,

    /// Algorithm (e.g. "RS256").
    #[serde(default)]
    pub alg: Option<String>,

    /// Key use (should be "sig" for signing).
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,

    /// RSA modulus (base64url encoded).
    #[serde(default)]
    pub n: Option<String>,

    /// RSA public exponent (base64url encoded).
    #[serde(default)]
    pub e: Option<String>,

    /// X.509 certificate chain (base64 DER certificates).
    #[serde(default)]
    pub x5c: Option<Vec<String>>,
}

impl Jwk {
    /// Extract the normalized public-key document from whichever material
    /// shape this entry carries.
    ///
    /// RSA components are preferred; a certificate-bearing entry falls
    /// back to its first certificate. Returns `None` when neither shape
    /// yields key material.
    #[must_use]
    pub fn signing_key(&self) -> Option<SigningKey> {
        if let (Some(n), Some(e)) = (&self.n, &self.e) {
            return Some(SigningKey::from_rsa_components(n, e));
        }
        if let Some(cert) = self.x5c.as_ref().and_then(|chain| chain.first()) {
            return Some(SigningKey::from_certificate_der(cert));
        }
        None
    }
}

/// JWKS document published by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct JwksResponse {
    /// List of JSON Web Keys.
    pub keys: Vec<Jwk>,
}

/// Client for the provider's key-by-id lookup.
///
/// Performs a single best-effort request per lookup; retries and caching
/// are the caller's concern.
pub struct JwksClient {
    /// URL to the JWKS endpoint.
    jwks_url: String,

    /// HTTP client for fetching JWKS.
    http_client: reqwest::Client,
}

impl JwksClient {
    /// Create a new JWKS client.
    ///
    /// # Arguments
    ///
    /// * `jwks_url` - URL to the provider's JWKS endpoint
    #[must_use]
    pub fn new(jwks_url: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "authorizer.auth.jwks", error = %e, "Failed to build HTTP client with custom config, using defaults");
                reqwest::Client::new()
            });

        Self {
            jwks_url,
            http_client,
        }
    }

    /// Fetch the signing key published for `kid`.
    ///
    /// # Errors
    ///
    /// - [`KeyResolutionError::Lookup`] when the endpoint is unreachable,
    ///   returns a non-success status, or the body cannot be parsed
    /// - [`KeyResolutionError::NotFound`] when the response carries no
    ///   entry for `kid`, or the matching entry has no usable key material
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn fetch_key(&self, kid: &str) -> Result<SigningKey, KeyResolutionError> {
        tracing::debug!(target: "authorizer.auth.jwks", url = %self.jwks_url, "Fetching JWKS from provider");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(target: "authorizer.auth.jwks", error = %e, "Failed to fetch JWKS");
                KeyResolutionError::Lookup(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                target: "authorizer.auth.jwks",
                status = %status,
                "JWKS endpoint returned error"
            );
            return Err(KeyResolutionError::Lookup(format!(
                "JWKS endpoint returned {status}"
            )));
        }

        let jwks: JwksResponse = response.json().await.map_err(|e| {
            tracing::error!(target: "authorizer.auth.jwks", error = %e, "Failed to parse JWKS response");
            KeyResolutionError::Lookup(e.to_string())
        })?;

        let Some(jwk) = jwks.keys.iter().find(|key| key.kid == kid) else {
            tracing::warn!(target: "authorizer.auth.jwks", kid = %kid, "Key not found in JWKS");
            return Err(KeyResolutionError::NotFound(kid.to_string()));
        };

        let Some(signing_key) = jwk.signing_key() else {
            tracing::warn!(
                target: "authorizer.auth.jwks",
                kid = %kid,
                "JWKS entry carries no usable public-key material"
            );
            return Err(KeyResolutionError::NotFound(kid.to_string()));
        };

        tracing::debug!(
            target: "authorizer.auth.jwks",
            kid = %kid,
            key_count = jwks.keys.len(),
            "Signing key resolved from provider"
        );

        Ok(signing_key)
    }
}
