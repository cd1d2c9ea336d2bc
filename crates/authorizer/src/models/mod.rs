//! Wire models for the gateway authorization contract.
//!
//! Field casing follows the gateway's JSON contract exactly; the document
//! shape is fixed (`2012-10-17` policies carrying a single
//! `execute-api:Invoke` statement).

use serde::{Deserialize, Serialize};

/// Policy document version understood by the gateway.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The one action an authorizer decision governs.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Inbound authorization request from the routing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizerRequest {
    /// Requested resource identifier.
    #[serde(rename = "methodArn")]
    pub method_arn: String,

    /// Raw Authorization header value (`Bearer <jwt>`).
    #[serde(rename = "authorizationToken")]
    pub authorization_token: String,
}

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// Single policy statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "Action")]
    pub action: String,

    #[serde(rename = "Effect")]
    pub effect: Effect,

    #[serde(rename = "Resource")]
    pub resource: String,
}

/// Policy document wrapping the statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "Statement")]
    pub statement: Vec<Statement>,
}

/// Free-form context returned alongside the policy. Only deny decisions
/// carry a message; the gateway surfaces it to the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outbound authorization decision consumed by the routing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizerDecision {
    #[serde(rename = "principalId")]
    pub principal_id: String,

    #[serde(rename = "policyDocument")]
    pub policy_document: PolicyDocument,

    #[serde(default)]
    pub context: DecisionContext,
}

impl AuthorizerDecision {
    /// Build an allow decision naming the verified subject as principal
    /// and scoping it to the requested resource.
    #[must_use]
    pub fn allow(principal_id: &str, resource: &str) -> Self {
        Self::with_effect(principal_id, Effect::Allow, resource, None)
    }

    /// Build a deny decision carrying a client-facing message.
    #[must_use]
    pub fn deny(message: &str) -> Self {
        Self::with_effect("*", Effect::Deny, "*", Some(message.to_string()))
    }

    fn with_effect(
        principal_id: &str,
        effect: Effect,
        resource: &str,
        message: Option<String>,
    ) -> Self {
        Self {
            principal_id: principal_id.to_string(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![Statement {
                    action: INVOKE_ACTION.to_string(),
                    effect,
                    resource: resource.to_string(),
                }],
            },
            context: DecisionContext { message },
        }
    }

    /// The effect of the first (and only) statement.
    #[must_use]
    pub fn effect(&self) -> Option<Effect> {
        self.policy_document.statement.first().map(|s| s.effect)
    }
}
