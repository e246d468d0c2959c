//! Caller identity, token claims, and the RS256 token signer.

pub mod claims;
pub mod id;
pub mod signer;
pub mod token;

pub use claims::*;
pub use id::*;
pub use signer::*;
pub use token::*;
