//! Role, config and key management endpoints

pub mod config;
pub mod keys;
pub mod roles;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Management routes; reads are open, writes go through `RequireAdmin`
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Roles
        .route("/roles", get(roles::list_roles))
        .route(
            "/roles/{name}",
            get(roles::get_role)
                .post(roles::upsert_role)
                .put(roles::upsert_role)
                .delete(roles::delete_role),
        )
        // Issuer config
        .route("/config", get(config::get_config).put(config::update_config))
        // Signing keys
        .route("/rotate", post(keys::rotate_keys))
}
