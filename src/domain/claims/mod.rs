//! Claim merge and validation
//!
//! Combines a role, the issuer config and caller-supplied claims into the
//! final claim set of a token. Everything here is pure: time and the token
//! identifier are passed in by the caller.

mod audience;
mod error;
mod merge;
mod reserved;

pub use audience::check_audience;
pub use error::ClaimError;
pub use merge::{merge_claims, ClaimSet};
pub use reserved::{
    is_role_reserved_claim, is_structural_claim, AUDIENCE, EXPIRES_AT, ISSUED_AT, ISSUER,
    NOT_BEFORE, SUBJECT, TOKEN_ID,
};
