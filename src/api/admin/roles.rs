//! Role management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Role, RoleWriteRequest};

/// Role view; patterns are rendered as their source strings
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub name: String,
    pub issuer: String,
    pub claims: Map<String, Value>,
    pub subject_pattern: Option<String>,
    pub audience_pattern: Option<String>,
    pub max_audiences: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            name: role.name().to_string(),
            issuer: role.issuer().to_string(),
            claims: role.claims().clone(),
            subject_pattern: role.subject_pattern().map(|p| p.as_str().to_string()),
            audience_pattern: role.audience_pattern().map(|p| p.as_str().to_string()),
            max_audiences: role.max_audiences(),
            created_at: role.created_at().to_rfc3339(),
            updated_at: role.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleListResponse {
    pub roles: Vec<String>,
    pub total: usize,
}

/// List role names, sorted
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<RoleListResponse>, ApiError> {
    debug!("Listing roles");

    let roles: Vec<String> = state
        .roles
        .list()
        .await?
        .into_iter()
        .map(String::from)
        .collect();
    let total = roles.len();

    Ok(Json(RoleListResponse { roles, total }))
}

pub async fn get_role(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RoleResponse>, ApiError> {
    debug!(role = %name, "Getting role");

    let role = state.roles.get(&name).await?;

    Ok(Json(RoleResponse::from(&role)))
}

/// Create or partially update a role
pub async fn upsert_role(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RoleWriteRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), ApiError> {
    debug!(role = %name, "Writing role");

    let saved = state.roles.upsert(&name, request).await?;
    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(RoleResponse::from(&saved.role))))
}

/// Delete a role; deleting an absent role also succeeds
pub async fn delete_role(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(role = %name, "Deleting role");

    state.roles.delete(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}
