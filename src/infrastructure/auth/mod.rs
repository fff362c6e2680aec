//! Token signing, public key publication and verification

mod jwks;
mod signer;
mod verifier;

pub use jwks::{Jwk, JwkSet, JwksPublisher};
pub use signer::{SignedToken, TokenSigner};
pub use verifier::TokenVerifier;

use jsonwebtoken::Algorithm;

/// The single signing algorithm issued tokens use
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;
