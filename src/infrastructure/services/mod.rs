//! Infrastructure services

mod config_service;
mod role_service;
mod token_service;

pub use config_service::ConfigService;
pub use role_service::{RoleService, SavedRole};
pub use token_service::{TokenService, TokenServiceDeps};
