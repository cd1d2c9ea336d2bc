//! Authorization endpoint handler.

use crate::errors::AuthError;
use crate::models::{AuthorizerDecision, AuthorizerRequest};
use crate::routes::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

/// Handle an inbound authorization request.
///
/// Returns a policy decision (allow or deny-with-message) on success. A
/// header that never carried a bearer token maps to 401 via
/// [`AuthError::InvalidAuthHeader`]; infrastructure faults map to 503.
///
/// # Errors
///
/// See [`AuthError`] for the response mapping.
#[instrument(skip_all, name = "authorizer.handlers.authorize")]
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuthorizerRequest>,
) -> Result<Json<AuthorizerDecision>, AuthError> {
    let decision = state
        .decision
        .authorize(&request.authorization_token, &request.method_arn)
        .await?;
    Ok(Json(decision))
}
