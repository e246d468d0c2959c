//! Crate-level error types shared by the signer, the dispatcher, and the transport layer.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Every failure propagates to the immediate caller; nothing in this crate retries.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The private key file could not be read.
	#[error("Failed to read the private key from {}.", path.display())]
	KeyLoad {
		/// Path that was requested.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// The key bytes are not a PEM-encoded RSA private key.
	#[error("Failed to parse the RSA private key.")]
	KeyParse(#[source] jsonwebtoken::errors::Error),
	/// The request could not be represented on the wire.
	#[error(transparent)]
	Encoding(#[from] EncodingError),
	/// The signing primitive rejected the key or failed.
	#[error("Failed to sign the request token.")]
	Signing(#[source] jsonwebtoken::errors::Error),
	/// Transport failure (DNS, TCP, TLS, timeout, body read).
	#[error(transparent)]
	Network(#[from] NetworkError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A typed call received a non-success status.
	#[error("API responded with HTTP {status}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Raw response payload, lossily decoded for diagnostics.
		body: String,
	},
	/// A typed call received a payload that does not match the expected model.
	#[error("API response body could not be decoded.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Failures raised while turning a call into wire bytes.
#[derive(Debug, ThisError)]
pub enum EncodingError {
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized to JSON.")]
	Body(#[source] serde_json::Error),
	/// Request path is not absolute.
	#[error("Request path `{path}` must start with '/'.")]
	InvalidPath {
		/// Offending path.
		path: String,
	},
	/// Target URL could not be assembled from the base URL and path.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Concatenated URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A header value contains bytes HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	HeaderValue {
		/// Header name.
		name: &'static str,
		/// Underlying validation failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	Request(#[from] http::Error),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL does not use HTTPS and is not a loopback address.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Rejected URL.
		url: String,
	},
	/// Base URL carries components that cannot prefix a request path.
	#[error("The base URL must be a bare origin without path, query, or fragment: {url}.")]
	InvalidBaseUrl {
		/// Rejected URL.
		url: String,
	},
	/// Caller identifier failed validation.
	#[error(transparent)]
	InvalidApiKey(#[from] crate::auth::IdentifierError),
	/// Token validity window is shorter than one second.
	#[error("The token validity window must be at least one second.")]
	NonPositiveValidity,
	/// Token expiry does not fit the claim's integer range.
	#[error("The token validity window overflows the expiry timestamp.")]
	ValidityOverflow,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

impl From<crate::auth::IdentifierError> for Error {
	fn from(e: crate::auth::IdentifierError) -> Self {
		Self::Config(e.into())
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum NetworkError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl NetworkError {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for NetworkError {
	fn from(e: ReqwestError) -> Self {
		Self::transport(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn key_load_message_names_the_path() {
		let err = Error::KeyLoad {
			path: PathBuf::from("/missing/key.pem"),
			source: std::io::Error::from(std::io::ErrorKind::NotFound),
		};

		assert_eq!(err.to_string(), "Failed to read the private key from /missing/key.pem.");
		assert!(err.source().is_some());
	}

	#[test]
	fn nested_errors_are_transparent() {
		let err: Error = EncodingError::InvalidPath { path: "v1/x".into() }.into();

		assert_eq!(err.to_string(), "Request path `v1/x` must start with '/'.");

		let err: Error = NetworkError::transport(std::io::Error::other("reset")).into();

		assert_eq!(err.to_string(), "Network error occurred while calling the API.");
		assert!(matches!(err, Error::Network(NetworkError::Transport { .. })));
	}

	#[test]
	fn invalid_api_keys_are_configuration_errors() {
		let err: Error = crate::auth::IdentifierError::Empty.into();

		assert!(matches!(err, Error::Config(ConfigError::InvalidApiKey(_))));
	}
}
