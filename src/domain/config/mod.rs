//! Issuer policy configuration domain
//!
//! A single persisted record governing which extra claims may be set, how
//! audiences are constrained, and the default token lifetime.

mod entity;
mod repository;
mod validation;

pub use entity::{ConfigUpdate, IssuerConfig, IssuerConfigId, DEFAULT_TOKEN_TTL_SECS};
pub use repository::ConfigRepository;
pub use validation::{validate_max_audiences, ConfigValidationError, MAX_TOKEN_TTL_SECS};
