//! Request dispatcher: sign once, send once, read the whole answer.
//!
//! [`Dispatcher::dispatch`] serializes the body a single time into a [`RequestBody`], asks the
//! [`TokenSigner`] for a token bound to that exact path and byte sequence, and hands the same
//! bytes to the transport. The transport is invoked at most once per call; the first failure
//! is returned to the caller as-is.

mod response;

pub use response::*;

// crates.io
use http::{
	HeaderValue, Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSigner,
	body::{JSON_CONTENT_TYPE, RequestBody},
	config::ClientConfig,
	error::{EncodingError, NetworkError},
	http::{ApiHttpClient, HttpRequest},
	obs::{self, CallOutcome, DispatchSpan},
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

/// Header carrying the caller identifier in plaintext.
pub const API_KEY_HEADER: &str = "x-api-key";

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default reqwest transport.
pub type ReqwestDispatcher = Dispatcher<ReqwestHttpClient>;

/// Sends signed requests to one API origin over one shared HTTP client.
///
/// The dispatcher holds no per-call state: it is cheap to clone and every call is an
/// independent request/response exchange, safe to run concurrently with others.
pub struct Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound request.
	pub http_client: Arc<C>,
	/// Origin and transport settings.
	pub config: ClientConfig,
}
impl<C> Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a dispatcher that reuses the caller-provided transport.
	pub fn with_http_client(config: &ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config: config.clone() }
	}

	/// Signs and sends `body` (serialized as JSON) to `path`.
	///
	/// # Errors
	///
	/// [`Error::Encoding`] when the body or path cannot be represented, [`Error::Signing`]
	/// when the signer fails, [`Error::Network`] when the transport fails. A non-success HTTP
	/// status is not an error.
	pub async fn dispatch<B>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		signer: &TokenSigner,
	) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		let body = body.map(RequestBody::json).transpose()?;

		self.dispatch_raw(method, path, body.as_ref(), signer).await
	}

	/// Signs and sends a body that was already serialized.
	pub async fn dispatch_raw(
		&self,
		method: Method,
		path: &str,
		body: Option<&RequestBody>,
		signer: &TokenSigner,
	) -> Result<ApiResponse> {
		let span = DispatchSpan::new(&method, path);

		obs::record_call_outcome(&method, CallOutcome::Attempt);

		let result: Result<ApiResponse> = span
			.instrument(async {
				let request = build_request(&self.config, method.clone(), path, body, signer)?;
				let response = self
					.http_client
					.execute(request)
					.await
					.map_err(NetworkError::transport)?;

				Ok(ApiResponse::from(response))
			})
			.await;

		match &result {
			Ok(response) => {
				span.record_status(response.status().as_u16());
				obs::record_call_outcome(&method, CallOutcome::Success);
			},
			Err(_) => obs::record_call_outcome(&method, CallOutcome::Failure),
		}

		result
	}

	/// Sends a body-less `GET` to `path`.
	pub async fn get(&self, path: &str, signer: &TokenSigner) -> Result<ApiResponse> {
		self.dispatch_raw(Method::GET, path, None, signer).await
	}

	/// Sends `body` as JSON with `POST` to `path`.
	pub async fn post<B>(&self, path: &str, body: &B, signer: &TokenSigner) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.dispatch(Method::POST, path, Some(body), signer).await
	}
}
#[cfg(feature = "reqwest")]
impl Dispatcher<ReqwestHttpClient> {
	/// Creates a dispatcher with its own reqwest transport built from `config`.
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::from_config(config)?))
	}
}
impl<C> Clone for Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), config: self.config.clone() }
	}
}
impl<C> Debug for Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher").field("config", &self.config).finish()
	}
}

fn build_request(
	config: &ClientConfig,
	method: Method,
	path: &str,
	body: Option<&RequestBody>,
	signer: &TokenSigner,
) -> Result<HttpRequest> {
	let url = config.endpoint(path)?;
	let token = signer.sign(path, body)?;
	let mut authorization = header_value("authorization", &token.bearer())?;

	authorization.set_sensitive(true);

	let mut builder = http::Request::builder()
		.method(method)
		.uri(url.as_str())
		.header(AUTHORIZATION, authorization)
		.header(API_KEY_HEADER, header_value(API_KEY_HEADER, signer.api_key())?);

	if body.is_some() {
		builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
	}

	let payload = body.map(|body| body.as_bytes().to_vec()).unwrap_or_default();

	Ok(builder.body(payload).map_err(EncodingError::from)?)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, EncodingError> {
	HeaderValue::from_str(value).map_err(|source| EncodingError::HeaderValue { name, source })
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		auth::{self, ApiKey},
		http::{HttpFuture, HttpResponse},
	};

	const PRIVATE_PEM: &[u8] = include_bytes!("../tests/fixtures/rsa_2048_private.pem");

	#[derive(Default)]
	struct CapturingHttpClient {
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl ApiHttpClient for CapturingHttpClient {
		type TransportError = std::io::Error;

		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			self.requests.lock().expect("Capture lock should not be poisoned.").push(request);

			Box::pin(async {
				let mut response = HttpResponse::new(br#"{"id":"7"}"#.to_vec());

				*response.status_mut() = http::StatusCode::CREATED;

				Ok(response)
			})
		}
	}

	fn signer() -> TokenSigner {
		TokenSigner::from_pem(PRIVATE_PEM, ApiKey::new("API_KEY").expect("Key should be valid."))
			.expect("Fixture key should parse.")
	}

	fn dispatcher() -> Dispatcher<CapturingHttpClient> {
		Dispatcher::with_http_client(&ClientConfig::default(), CapturingHttpClient::default())
	}

	#[tokio::test]
	async fn post_sends_the_bytes_it_signed() {
		let dispatcher = dispatcher();
		let response = dispatcher
			.post(
				"/v1/vault/accounts",
				&json!({ "name": "MyGoVault", "hiddenOnUI": true }),
				&signer(),
			)
			.await
			.expect("Dispatch should succeed.");

		assert_eq!(response.status(), http::StatusCode::CREATED);
		assert_eq!(response.body(), br#"{"id":"7"}"#);

		let requests = dispatcher.http_client.requests.lock().expect("Lock should be free.");
		let request = requests.first().expect("One request should be captured.");
		let bearer = request.headers()[AUTHORIZATION].to_str().expect("Header should be ASCII.");
		let token = auth::SignedToken::new(
			bearer.strip_prefix("Bearer ").expect("Authorization must use the Bearer scheme."),
		);
		let claims = token.claims().expect("Token payload should decode.");

		assert_eq!(requests.len(), 1);
		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://api.fireblocks.io/v1/vault/accounts");
		assert_eq!(request.body(), br#"{"hiddenOnUI":true,"name":"MyGoVault"}"#);
		assert_eq!(claims.body_hash, auth::body_hash(request.body()));
		assert_eq!(claims.uri, "/v1/vault/accounts");
		assert_eq!(request.headers()[API_KEY_HEADER], "API_KEY");
		assert_eq!(request.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
		assert!(request.headers()[AUTHORIZATION].is_sensitive());
	}

	#[tokio::test]
	async fn get_omits_content_type_and_hashes_empty_body() {
		let dispatcher = dispatcher();

		dispatcher
			.get("/v1/vault/accounts_paged", &signer())
			.await
			.expect("Dispatch should succeed.");

		let requests = dispatcher.http_client.requests.lock().expect("Lock should be free.");
		let request = requests.first().expect("One request should be captured.");
		let bearer = request.headers()[AUTHORIZATION].to_str().expect("Header should be ASCII.");
		let claims = auth::SignedToken::new(&bearer["Bearer ".len()..])
			.claims()
			.expect("Token payload should decode.");

		assert!(request.body().is_empty());
		assert!(request.headers().get(CONTENT_TYPE).is_none());
		assert_eq!(claims.body_hash, auth::body_hash(b""));
	}

	#[tokio::test]
	async fn relative_paths_are_rejected_before_sending() {
		let dispatcher = dispatcher();
		let err = dispatcher
			.get("v1/vault/accounts_paged", &signer())
			.await
			.expect_err("Relative paths must be rejected.");

		assert!(matches!(err, Error::Encoding(EncodingError::InvalidPath { .. })));
		assert!(dispatcher.http_client.requests.lock().expect("Lock should be free.").is_empty());
	}

	#[tokio::test]
	async fn paths_the_url_parser_would_rewrite_are_rejected() {
		let dispatcher = dispatcher();

		for path in ["/v1/x/../vault/accounts", "/v1/vault/accounts_paged?namePrefix=My Vault"] {
			let err = dispatcher
				.get(path, &signer())
				.await
				.expect_err("The signed uri must match the request target.");

			assert!(matches!(err, Error::Encoding(EncodingError::InvalidPath { .. })), "{path}");
		}

		assert!(dispatcher.http_client.requests.lock().expect("Lock should be free.").is_empty());
	}

	#[tokio::test]
	async fn signed_uri_matches_the_request_target() {
		let dispatcher = dispatcher();
		let path = "/v1/vault/accounts_paged?namePrefix=My%20Vault&limit=2";

		dispatcher.get(path, &signer()).await.expect("Dispatch should succeed.");

		let requests = dispatcher.http_client.requests.lock().expect("Lock should be free.");
		let request = requests.first().expect("One request should be captured.");
		let bearer = request.headers()[AUTHORIZATION].to_str().expect("Header should be ASCII.");
		let claims = auth::SignedToken::new(&bearer["Bearer ".len()..])
			.claims()
			.expect("Token payload should decode.");

		assert_eq!(request.uri().path_and_query().map(|target| target.as_str()), Some(path));
		assert_eq!(claims.uri, path);
	}
}
