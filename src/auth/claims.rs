//! Claim set carried by every request token.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Claims bound into a request token.
///
/// Field names are fixed by the API's wire contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Request path exactly as sent, including any query string.
	pub uri: String,
	/// Single-use random identifier.
	pub nonce: String,
	/// Issue time in Unix seconds.
	pub iat: i64,
	/// Expiry time in Unix seconds.
	pub exp: i64,
	/// Caller identifier.
	pub sub: String,
	/// Lowercase hex SHA-256 of the transmitted body bytes.
	#[serde(rename = "bodyHash")]
	pub body_hash: String,
}
impl TokenClaims {
	/// Validity window encoded by the claims.
	pub fn validity(&self) -> Duration {
		Duration::seconds(self.exp - self.iat)
	}
}

/// Hex-encoded SHA-256 digest of `bytes`; the empty slice hashes to the digest of nothing.
pub fn body_hash(bytes: &[u8]) -> String {
	hex::encode(Sha256::digest(bytes))
}
