//! Token issuance and public key endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::auth::JwkSet;

/// Body of a sign request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignRequest {
    #[serde(default)]
    pub claims: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignResponse {
    pub token: String,
}

/// Issue a token under the named role
pub async fn sign_token(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(request): Json<SignRequest>,
) -> Result<Json<SignResponse>, ApiError> {
    debug!(role = %role, claims = request.claims.len(), "Sign request");

    let signed = state.tokens.sign(&role, request.claims).await?;

    Ok(Json(SignResponse {
        token: signed.token,
    }))
}

/// Publish the verification keys
pub async fn get_jwks(State(state): State<AppState>) -> Result<Json<JwkSet>, ApiError> {
    let keys = state.jwks.public_key_set().await?;

    debug!(keys = keys.keys.len(), "Serving JWKS");

    Ok(Json(keys))
}
