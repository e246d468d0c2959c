//! Transport primitives for signed API calls.
//!
//! The module exposes [`ApiHttpClient`], the dispatcher's only dependency on an HTTP stack,
//! together with the reqwest-backed [`ReqwestHttpClient`]. Requests and responses are plain
//! [`http`] types carrying owned byte buffers, so a transport never re-serializes the body the
//! signer already hashed.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Outbound request with its fully serialized payload.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Inbound response with its payload read into memory.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing one signed API call.
///
/// Implementations must send the request exactly once, read the whole response body, and
/// report any transport failure (DNS, TCP, TLS, timeout, body read) as
/// [`ApiHttpClient::TransportError`]. Non-success statuses are responses, not errors.
/// Implementations must be `Send + Sync + 'static` so one instance can be shared behind an
/// `Arc` by every dispatcher in the process.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves once the full response has been received.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Signed tokens are bound to one path, so redirects are never followed: a redirected
/// request would present a token whose `uri` claim no longer matches.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configured timeout with redirects disabled.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.request_timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let version = response.version();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();
			let mut response_new = HttpResponse::new(body);

			*response_new.status_mut() = status;
			*response_new.version_mut() = version;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
