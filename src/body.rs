//! Request payloads serialized exactly once.
//!
//! A [`RequestBody`] owns the bytes that will be both hashed into the token and written to
//! the wire, so the signed digest can never drift from the transmitted content.

// self
use crate::{_prelude::*, auth, error::EncodingError};

/// Media type attached to requests that carry a body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialized request payload.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestBody(Vec<u8>);
impl RequestBody {
	/// Serializes `value` as compact JSON.
	///
	/// `serde_json::Value` objects serialize with their keys in sorted order; structs keep
	/// field-declaration order.
	pub fn json<T>(value: &T) -> Result<Self, EncodingError>
	where
		T: ?Sized + Serialize,
	{
		serde_json::to_vec(value).map(Self).map_err(EncodingError::Body)
	}

	/// Wraps bytes the caller already serialized.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Borrows the wire bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Returns the wire bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	/// Byte length of the payload.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the payload is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Hex SHA-256 digest of the wire bytes.
	pub fn hash(&self) -> String {
		auth::body_hash(&self.0)
	}
}
impl Debug for RequestBody {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestBody").field("len", &self.0.len()).finish()
	}
}
