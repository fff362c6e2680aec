//! Registered claim names the issuer controls

pub const ISSUER: &str = "iss";
pub const SUBJECT: &str = "sub";
pub const AUDIENCE: &str = "aud";
pub const EXPIRES_AT: &str = "exp";
pub const ISSUED_AT: &str = "iat";
pub const NOT_BEFORE: &str = "nbf";
pub const TOKEN_ID: &str = "jti";

/// Claims computed at signing time; never settable by a role or a request
const STRUCTURAL_CLAIMS: [&str; 5] = [ISSUER, EXPIRES_AT, ISSUED_AT, NOT_BEFORE, TOKEN_ID];

pub fn is_structural_claim(name: &str) -> bool {
    STRUCTURAL_CLAIMS.contains(&name)
}

/// Claims a role may never fix: the structural set plus `sub`, which only
/// ever comes from the request
pub fn is_role_reserved_claim(name: &str) -> bool {
    name == SUBJECT || is_structural_claim(name)
}
