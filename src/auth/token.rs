//! Signed request token wrapper that redacts sensitive material.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
// self
use crate::{_prelude::*, auth::TokenClaims};

/// Compact RS256 JWT issued for exactly one request.
///
/// The token is a bearer credential until it expires, so formatters never print it.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);
impl SignedToken {
	pub(crate) fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the compact token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.0)
	}

	/// Decodes the claim set without verifying the signature or the expiry.
	///
	/// Only meant for diagnostics on tokens this process produced.
	pub fn claims(&self) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
		let mut validation = Validation::new(Algorithm::RS256);

		validation.insecure_disable_signature_validation();
		validation.validate_exp = false;
		validation.required_spec_claims.clear();

		jsonwebtoken::decode::<TokenClaims>(&self.0, &DecodingKey::from_secret(&[]), &validation)
			.map(|data| data.claims)
	}
}
impl AsRef<str> for SignedToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SignedToken").field(&"<redacted>").finish()
	}
}
impl Display for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
