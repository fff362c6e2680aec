use thiserror::Error;

/// Reasons a set of requested claims is refused
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClaimError {
    #[error("'{0}' is a reserved claim and cannot be requested")]
    ReservedClaim(String),

    #[error("'{0}' is fixed by the role and cannot be overridden")]
    RoleClaimOverride(String),

    #[error("Claim '{0}' is not permitted by the issuer config")]
    DisallowedClaim(String),

    #[error("Subject '{0}' does not match the role subject pattern")]
    SubjectMismatch(String),

    #[error("Audience '{0}' does not match the audience pattern")]
    AudienceMismatch(String),

    #[error("{count} audiences requested, at most {max} allowed")]
    TooManyAudiences { count: usize, max: i64 },

    #[error("Claim '{claim}' must be a {expected}")]
    InvalidType {
        claim: String,
        expected: &'static str,
    },

    #[error("Token lifetime of {0}s cannot be applied")]
    TokenLifetime(u64),
}

impl ClaimError {
    /// True for malformed value types, false for policy refusals
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::InvalidType { .. })
    }

    /// True when the issuer config, not the request, is at fault
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::TokenLifetime(_))
    }

    /// Short label used for metrics and logs
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ReservedClaim(_) => "reserved_claim",
            Self::RoleClaimOverride(_) => "role_claim_override",
            Self::DisallowedClaim(_) => "disallowed_claim",
            Self::SubjectMismatch(_) => "subject_mismatch",
            Self::AudienceMismatch(_) => "audience_mismatch",
            Self::TooManyAudiences { .. } => "too_many_audiences",
            Self::InvalidType { .. } => "invalid_type",
            Self::TokenLifetime(_) => "token_lifetime",
        }
    }
}
