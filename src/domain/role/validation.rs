//! Role validation
//!
//! Write-time checks binding a role to the issuer config in force when the
//! role is written. Roles are not re-validated when the config later
//! changes.

use thiserror::Error;

use super::entity::Role;
use crate::domain::claims::{check_audience, is_role_reserved_claim, ClaimError, AUDIENCE};
use crate::domain::config::IssuerConfig;

/// Errors that can occur during role validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoleValidationError {
    #[error("Role name cannot be empty")]
    EmptyName,

    #[error("Role name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Role name can only contain lowercase alphanumerics, '-', '_' and '.'")]
    InvalidNameCharacters,

    #[error("Role name must start and end with an alphanumeric character")]
    InvalidNameFormat,

    #[error("Missing issuer in role")]
    MissingIssuer,

    #[error("'{0}' claim cannot be present in 'claims' field")]
    ReservedClaim(String),

    #[error("Claim '{0}' not permitted by the issuer config")]
    ClaimNotAllowed(String),

    #[error("Invalid subject pattern: {0}")]
    InvalidSubjectPattern(String),

    #[error("Invalid audience pattern: {0}")]
    InvalidAudiencePattern(String),

    #[error("max_audiences must be -1 (unbounded) or greater, got {0}")]
    InvalidMaxAudiences(i64),

    #[error("max_audiences {role} exceeds the config limit of {config}")]
    MaxAudiencesExceedsConfig { role: i64, config: i64 },

    #[error("Role 'aud' claim rejected: {0}")]
    Audience(#[from] ClaimError),
}

const MAX_ROLE_NAME_LENGTH: usize = 128;

/// Validate a (lowercased) role name
pub fn validate_role_name(name: &str) -> Result<(), RoleValidationError> {
    if name.is_empty() {
        return Err(RoleValidationError::EmptyName);
    }

    if name.len() > MAX_ROLE_NAME_LENGTH {
        return Err(RoleValidationError::NameTooLong(MAX_ROLE_NAME_LENGTH));
    }

    if !name.chars().all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')
    }) {
        return Err(RoleValidationError::InvalidNameCharacters);
    }

    let alphanumeric = |c: char| c.is_ascii_alphanumeric();

    if !name.starts_with(alphanumeric) || !name.ends_with(alphanumeric) {
        return Err(RoleValidationError::InvalidNameFormat);
    }

    Ok(())
}

/// Validate a complete role against the current issuer config.
///
/// Checks, in order: no reserved structural claims, every non-`aud` claim is
/// allow-listed, any fixed `aud` satisfies the config audience policy, and a
/// role-level audience ceiling never loosens the config ceiling.
pub fn validate_role_against_config(
    role: &Role,
    config: &IssuerConfig,
) -> Result<(), RoleValidationError> {
    for name in role.claims().keys() {
        if is_role_reserved_claim(name) {
            return Err(RoleValidationError::ReservedClaim(name.clone()));
        }
    }

    for name in role.claims().keys() {
        if name != AUDIENCE && !config.is_claim_allowed(name) {
            return Err(RoleValidationError::ClaimNotAllowed(name.clone()));
        }
    }

    if let Some(aud) = role.claims().get(AUDIENCE) {
        check_audience(aud, config.audience_pattern(), config.max_audiences())?;
    }

    if let Some(max) = role.max_audiences() {
        if max < -1 {
            return Err(RoleValidationError::InvalidMaxAudiences(max));
        }

        let config_max = config.max_audiences();

        if config_max != -1 && (max == -1 || max > config_max) {
            return Err(RoleValidationError::MaxAudiencesExceedsConfig {
                role: max,
                config: config_max,
            });
        }
    }

    Ok(())
}
