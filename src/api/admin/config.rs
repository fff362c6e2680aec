//! Issuer config endpoints

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{ConfigUpdate, IssuerConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub allowed_claims: Vec<String>,
    pub audience_pattern: String,
    pub max_audiences: i64,
    pub token_ttl_secs: u64,
    pub updated_at: String,
}

impl From<&IssuerConfig> for ConfigResponse {
    fn from(config: &IssuerConfig) -> Self {
        Self {
            allowed_claims: config.allowed_claims().iter().cloned().collect(),
            audience_pattern: config.audience_pattern().as_str().to_string(),
            max_audiences: config.max_audiences(),
            token_ttl_secs: config.token_ttl_secs(),
            updated_at: config.updated_at().to_rfc3339(),
        }
    }
}

pub async fn get_config(State(state): State<AppState>) -> Result<Json<ConfigResponse>, ApiError> {
    debug!("Getting issuer config");

    let config = state.config.get().await?;

    Ok(Json(ConfigResponse::from(&config)))
}

/// Partially update the issuer config
pub async fn update_config(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<ConfigResponse>, ApiError> {
    debug!("Updating issuer config");

    let config = state.config.update(update).await?;

    Ok(Json(ConfigResponse::from(&config)))
}
