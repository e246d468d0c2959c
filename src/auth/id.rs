//! Strongly typed caller identifier echoed in every signed request.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const API_KEY_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("API key cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("API key contains whitespace.")]
	ContainsWhitespace,
	/// The identifier contains characters that cannot travel in an HTTP header.
	#[error("API key must contain visible ASCII characters only.")]
	NonVisibleAscii,
	/// The identifier exceeded the allowed character count.
	#[error("API key exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Opaque identifier of the API consumer.
///
/// The value travels twice on every request: as the `sub` claim of the signed token and in
/// plaintext as the `X-API-KEY` header. Validation guarantees it is always a legal header
/// value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKey(String);
impl ApiKey {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for ApiKey {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ApiKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ApiKey> for String {
	fn from(value: ApiKey) -> Self {
		value.0
	}
}
impl TryFrom<String> for ApiKey {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for ApiKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ApiKey({})", self.0)
	}
}
impl Display for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for ApiKey {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if !view.bytes().all(|b| b.is_ascii_graphic()) {
		return Err(IdentifierError::NonVisibleAscii);
	}
	if view.len() > API_KEY_MAX_LEN {
		return Err(IdentifierError::TooLong { max: API_KEY_MAX_LEN });
	}

	Ok(())
}
