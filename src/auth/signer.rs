//! RS256 token signer bound to one private key and one caller identifier.

// std
use std::{fs, path::Path};
// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use uuid::Uuid;
// self
use crate::{
	_prelude::*,
	auth::{self, ApiKey, SignedToken, TokenClaims},
	body::RequestBody,
	config::ClientConfig,
	error::ConfigError,
	obs,
};

/// Seconds between a token's `iat` and `exp` unless overridden.
pub const DEFAULT_TOKEN_VALIDITY: Duration = Duration::seconds(55);

const KEY_PROBE: &[u8] = b"signed-api-client key probe";

/// Issues a fresh, body-bound token for every request.
///
/// The signer only holds immutable state, so one instance can be shared across tasks and
/// threads without locking. Nonces and timestamps are generated per call.
#[derive(Clone)]
pub struct TokenSigner {
	key: EncodingKey,
	api_key: ApiKey,
	validity: Duration,
}
impl TokenSigner {
	/// Loads a PEM-encoded RSA private key (PKCS#1 or PKCS#8) from `path`.
	///
	/// # Errors
	///
	/// [`Error::KeyLoad`] when the file cannot be read, [`Error::KeyParse`] when its
	/// contents are not an RSA private key.
	pub fn from_pem_file(path: impl AsRef<Path>, api_key: ApiKey) -> Result<Self> {
		let path = path.as_ref();
		let pem =
			fs::read(path).map_err(|source| Error::KeyLoad { path: path.to_owned(), source })?;

		obs::debug_event!(path = %path.display(), "Loaded signing key from disk.");

		Self::from_pem(&pem, api_key)
	}

	/// Builds a signer from in-memory PEM bytes.
	///
	/// The key is exercised once with a probe signature so that material which only looks
	/// like a private key (a public key, a truncated body) is rejected here instead of on the
	/// first request.
	pub fn from_pem(pem: &[u8], api_key: ApiKey) -> Result<Self> {
		let key = EncodingKey::from_rsa_pem(pem).map_err(Error::KeyParse)?;

		jsonwebtoken::crypto::sign(KEY_PROBE, &key, Algorithm::RS256).map_err(Error::KeyParse)?;

		Ok(Self { key, api_key, validity: DEFAULT_TOKEN_VALIDITY })
	}

	/// Overrides the validity window (defaults to [`DEFAULT_TOKEN_VALIDITY`]).
	///
	/// Windows shorter than one second are rejected; claims carry whole seconds only.
	pub fn with_validity(mut self, validity: Duration) -> Result<Self> {
		self.validity = validate_validity(validity)?;

		Ok(self)
	}

	/// Adopts the validity window of an already validated [`ClientConfig`].
	pub fn configured(mut self, config: &ClientConfig) -> Self {
		self.validity = config.token_validity;

		self
	}

	/// Caller identifier placed in the `sub` claim.
	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	/// Validity window applied to every token.
	pub fn validity(&self) -> Duration {
		self.validity
	}

	/// Signs a token for `path` and `body`, issued now.
	///
	/// `path` must be the exact path (with query string, if any) that will be requested.
	/// An absent body is hashed as the empty byte sequence.
	pub fn sign(&self, path: &str, body: Option<&RequestBody>) -> Result<SignedToken> {
		self.sign_at(path, body, OffsetDateTime::now_utc())
	}

	/// Signs a token for `path` and `body` as if issued at `issued_at`.
	pub fn sign_at(
		&self,
		path: &str,
		body: Option<&RequestBody>,
		issued_at: OffsetDateTime,
	) -> Result<SignedToken> {
		let claims = self.claims_at(path, body, issued_at)?;
		let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
			.map_err(Error::Signing)?;

		obs::debug_event!(
			uri = %claims.uri,
			nonce = %claims.nonce,
			exp = claims.exp,
			"Issued request token."
		);

		Ok(SignedToken::new(token))
	}

	fn claims_at(
		&self,
		path: &str,
		body: Option<&RequestBody>,
		issued_at: OffsetDateTime,
	) -> Result<TokenClaims> {
		let iat = issued_at.unix_timestamp();
		let exp = iat
			.checked_add(self.validity.whole_seconds())
			.ok_or(ConfigError::ValidityOverflow)?;

		Ok(TokenClaims {
			uri: path.to_owned(),
			nonce: Uuid::new_v4().to_string(),
			iat,
			exp,
			sub: self.api_key.to_string(),
			body_hash: body.map(RequestBody::hash).unwrap_or_else(|| auth::body_hash(&[])),
		})
	}
}
impl Debug for TokenSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSigner")
			.field("api_key", &self.api_key)
			.field("validity", &self.validity)
			.field("key", &"<redacted>")
			.finish()
	}
}

/// Accepts validity windows of at least one whole second.
pub(crate) fn validate_validity(validity: Duration) -> Result<Duration, ConfigError> {
	if validity.whole_seconds() < 1 {
		return Err(ConfigError::NonPositiveValidity);
	}

	Ok(validity)
}
