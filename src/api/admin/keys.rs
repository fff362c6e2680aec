//! Signing key rotation endpoint

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

#[derive(Debug, Clone, Serialize)]
pub struct RotateResponse {
    pub key_id: String,
    pub created_at: String,
}

/// Replace the active signing key
pub async fn rotate_keys(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<RotateResponse>, ApiError> {
    debug!("Rotating signing key");

    let key = state.keys.rotate().await?;

    Ok(Json(RotateResponse {
        key_id: key.id().to_string(),
        created_at: key.created_at().to_rfc3339(),
    }))
}
