//! Application state shared by the handlers

use std::sync::Arc;

use crate::api::middleware::AdminCredentials;
use crate::infrastructure::auth::JwksPublisher;
use crate::infrastructure::keys::KeyManager;
use crate::infrastructure::services::{ConfigService, RoleService, TokenService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub roles: Arc<RoleService>,
    pub config: Arc<ConfigService>,
    pub keys: Arc<KeyManager>,
    pub jwks: Arc<JwksPublisher>,
    pub admin: AdminCredentials,
}
