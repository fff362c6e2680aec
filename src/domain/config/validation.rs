//! Issuer config validation

use thiserror::Error;

use crate::domain::claims::is_structural_claim;

/// Longest token lifetime a config may set (one day)
pub const MAX_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Errors raised when writing the issuer config
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("Invalid audience pattern: {0}")]
    InvalidAudiencePattern(String),

    #[error("max_audiences must be -1 (unbounded) or greater, got {0}")]
    InvalidMaxAudiences(i64),

    #[error("token_ttl_secs must be between 1 and {max}, got {0}", max = MAX_TOKEN_TTL_SECS)]
    InvalidTokenTtl(u64),

    #[error("Claim '{0}' is generated by the issuer and cannot be allowed")]
    ReservedAllowedClaim(String),

    #[error("Allowed claim names cannot be empty")]
    EmptyAllowedClaim,
}

/// Validate a max-audience count (`-1` means unbounded)
pub fn validate_max_audiences(value: i64) -> Result<(), ConfigValidationError> {
    if value < -1 {
        return Err(ConfigValidationError::InvalidMaxAudiences(value));
    }

    Ok(())
}

/// Validate one entry of the allowed-claims list
pub fn validate_allowed_claim(name: &str) -> Result<(), ConfigValidationError> {
    if name.trim().is_empty() {
        return Err(ConfigValidationError::EmptyAllowedClaim);
    }

    if is_structural_claim(name) {
        return Err(ConfigValidationError::ReservedAllowedClaim(name.to_string()));
    }

    Ok(())
}

pub fn validate_token_ttl(secs: u64) -> Result<(), ConfigValidationError> {
    if secs == 0 || secs > MAX_TOKEN_TTL_SECS {
        return Err(ConfigValidationError::InvalidTokenTtl(secs));
    }

    Ok(())
}
