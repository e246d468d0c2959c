//! Client configuration: API origin, request timeout, token validity.

// crates.io
use url::Position;
// self
use crate::{
	_prelude::*,
	auth::{DEFAULT_TOKEN_VALIDITY, signer},
	error::{ConfigError, EncodingError},
};

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.fireblocks.io";
/// Sandbox API origin.
pub const SANDBOX_BASE_URL: &str = "https://sandbox-api.fireblocks.io";
/// Upper bound on one request/response exchange.
pub const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Validated settings shared by the dispatcher and its transport.
///
/// Values only come from [`ClientConfig::builder`], [`ClientConfig::default`], or
/// [`ClientConfig::sandbox`], so every instance has passed validation:
///
/// ```compile_fail
/// use signed_api_client::config::ClientConfig;
///
/// let config = ClientConfig { token_validity: time::Duration::ZERO, ..Default::default() };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	pub(crate) base_url: Url,
	pub(crate) request_timeout: std::time::Duration,
	pub(crate) token_validity: Duration,
}
impl ClientConfig {
	/// Starts a builder seeded with production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Configuration targeting the sandbox origin.
	pub fn sandbox() -> Self {
		Self { base_url: parse_static(SANDBOX_BASE_URL), ..Self::default() }
	}

	/// Origin every request path is appended to.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Timeout applied by the default reqwest transport.
	pub fn request_timeout(&self) -> std::time::Duration {
		self.request_timeout
	}

	/// Validity window for signers built from this configuration.
	pub fn token_validity(&self) -> Duration {
		self.token_validity
	}

	/// Joins `path` onto the base URL.
	///
	/// The path must start with `/` and must already be in the form the URL parser emits:
	/// paths with dot-segments, a fragment, or characters that would be percent-encoded are
	/// rejected, since the request target would no longer match the token's `uri` claim.
	pub(crate) fn endpoint(&self, path: &str) -> Result<Url, EncodingError> {
		if !path.starts_with('/') {
			return Err(EncodingError::InvalidPath { path: path.to_owned() });
		}

		let joined = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
		let url = Url::parse(&joined)
			.map_err(|source| EncodingError::InvalidUrl { url: joined, source })?;

		if url.fragment().is_some() || &url[Position::BeforePath..Position::AfterQuery] != path {
			return Err(EncodingError::InvalidPath { path: path.to_owned() });
		}

		Ok(url)
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: parse_static(DEFAULT_BASE_URL),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			token_validity: DEFAULT_TOKEN_VALIDITY,
		}
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Overrides the API origin.
	pub base_url: Option<Url>,
	/// Overrides the request timeout.
	pub request_timeout: Option<std::time::Duration>,
	/// Overrides the token validity window.
	pub token_validity: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Sets the API origin.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the request timeout.
	pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Sets the token validity window.
	pub fn token_validity(mut self, validity: Duration) -> Self {
		self.token_validity = Some(validity);

		self
	}

	/// Validates and returns the configuration.
	///
	/// The base URL must use HTTPS unless it points at a loopback host, and must be a bare
	/// origin: no path prefix, query, or fragment. The token validity must be at least one
	/// second.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let defaults = ClientConfig::default();
		let base_url = self.base_url.unwrap_or(defaults.base_url);

		if base_url.scheme() != "https" && !(base_url.scheme() == "http" && is_loopback(&base_url))
		{
			return Err(ConfigError::InsecureBaseUrl { url: base_url.to_string() });
		}
		if base_url.path() != "/"
			|| base_url.query().is_some()
			|| base_url.fragment().is_some()
			|| base_url.cannot_be_a_base()
		{
			return Err(ConfigError::InvalidBaseUrl { url: base_url.to_string() });
		}

		let token_validity =
			signer::validate_validity(self.token_validity.unwrap_or(defaults.token_validity))?;

		Ok(ClientConfig {
			base_url,
			request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
			token_validity,
		})
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}

fn parse_static(value: &'static str) -> Url {
	Url::parse(value).expect("Built-in origin must be a valid URL.")
}
