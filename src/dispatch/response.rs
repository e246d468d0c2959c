//! Fully buffered API responses.

// std
use std::borrow::Cow;
// crates.io
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, http::HttpResponse};

/// Status, headers, and the complete payload of one API call.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Vec<u8>,
}
impl ApiResponse {
	/// HTTP status returned by the API.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Response headers.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Raw payload bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Consumes the response, returning the raw payload.
	pub fn into_body(self) -> Vec<u8> {
		self.body
	}

	/// Payload decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Turns a non-2xx status into [`Error::Api`].
	pub fn error_for_status(self) -> Result<Self> {
		if self.is_success() {
			Ok(self)
		} else {
			Err(Error::Api { status: self.status.as_u16(), body: self.text().into_owned() })
		}
	}

	/// Decodes the payload as JSON into `T`, reporting the failing field path on mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source, status: self.status.as_u16() })
	}
}
impl From<HttpResponse> for ApiResponse {
	fn from(response: HttpResponse) -> Self {
		let (parts, body) = response.into_parts();

		Self { status: parts.status, headers: parts.headers, body }
	}
}
