//! Authorizer configuration.
//!
//! Configuration is loaded from environment variables; the JWKS URL and
//! token issuer derive from the provider domain unless overridden.

use crate::auth::ExpectedClaims;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default clock-skew leeway for expiry validation, in seconds.
pub const DEFAULT_CLOCK_SKEW_SECONDS: u64 = 60;

/// Upper bound on configurable clock skew; larger values weaken expiry
/// checks.
pub const MAX_CLOCK_SKEW_SECONDS: u64 = 600;

/// Authorizer configuration.
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Identity-provider tenant domain (e.g. "tenant.example.auth0.com").
    pub idp_domain: String,

    /// Expected audience (the API identifier).
    pub api_audience: String,

    /// JWKS endpoint URL; derived from the domain unless overridden.
    pub jwks_url: String,

    /// Expected token issuer; always `https://<domain>/`.
    pub issuer: String,

    /// Clock-skew leeway in seconds for expiry validation.
    pub jwt_clock_skew_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT clock skew configuration: {0}")]
    InvalidJwtClockSkew(String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails validation.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let idp_domain = vars
            .get("IDP_DOMAIN")
            .ok_or_else(|| ConfigError::MissingEnvVar("IDP_DOMAIN".to_string()))?
            .clone();

        let api_audience = vars
            .get("API_AUDIENCE")
            .ok_or_else(|| ConfigError::MissingEnvVar("API_AUDIENCE".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let jwks_url = vars
            .get("IDP_JWKS_URL")
            .cloned()
            .unwrap_or_else(|| format!("https://{idp_domain}/.well-known/jwks.json"));

        let issuer = format!("https://{idp_domain}/");

        let jwt_clock_skew_seconds = match vars.get("JWT_CLOCK_SKEW_SECONDS") {
            Some(raw) => {
                let parsed: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidJwtClockSkew(format!("not a number: {raw}"))
                })?;
                if parsed > MAX_CLOCK_SKEW_SECONDS {
                    return Err(ConfigError::InvalidJwtClockSkew(format!(
                        "must be at most {MAX_CLOCK_SKEW_SECONDS} seconds, got {parsed}"
                    )));
                }
                parsed
            }
            None => DEFAULT_CLOCK_SKEW_SECONDS,
        };

        Ok(Config {
            bind_address,
            idp_domain,
            api_audience,
            jwks_url,
            issuer,
            jwt_clock_skew_seconds,
        })
    }

    /// Claim values tokens must match under this configuration.
    #[must_use]
    pub fn expected_claims(&self) -> ExpectedClaims {
        ExpectedClaims {
            audience: self.api_audience.clone(),
            issuer: self.issuer.clone(),
        }
    }
}
