//! Role domain module
//!
//! A role is a named template binding an issuer and a set of fixed or
//! constrained claims for every token issued under it.

mod entity;
mod repository;
mod validation;

pub use entity::{Role, RoleName, RoleWriteRequest};
pub use repository::RoleRepository;
pub use validation::{validate_role_against_config, validate_role_name, RoleValidationError};

#[cfg(test)]
pub use repository::mock;
