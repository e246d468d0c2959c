//! Helpers shared by the integration tests.

#![allow(dead_code)]

// std
use std::path::PathBuf;
// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
// self
use signed_api_client::{
	auth::{ApiKey, SignedToken, TokenClaims, TokenSigner},
	config::ClientConfig,
	dispatch::Dispatcher,
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	url::Url,
};

/// Caller identifier used across tests.
pub const TEST_API_KEY: &str = "API_KEY";

/// Returns the path of a PEM fixture shipped under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Reads a PEM fixture into memory.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
	std::fs::read(fixture_path(name)).expect("Failed to read PEM fixture.")
}

/// Builds a signer over the 2048-bit PKCS#1 test key and [`TEST_API_KEY`].
pub fn test_signer() -> TokenSigner {
	TokenSigner::from_pem_file(
		fixture_path("rsa_2048_private.pem"),
		ApiKey::new(TEST_API_KEY).expect("Test API key should be valid."),
	)
	.expect("Failed to load the test signing key.")
}

/// Verifies `token` against the public half of `public_fixture` and returns its claims.
pub fn verify_with(
	token: &SignedToken,
	public_fixture: &str,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
	let key = DecodingKey::from_rsa_pem(&fixture_bytes(public_fixture))
		.expect("Public key fixture should parse.");

	jsonwebtoken::decode::<TokenClaims>(token.expose(), &key, &Validation::new(Algorithm::RS256))
		.map(|data| data.claims)
}

/// Verifies `token` against the test key pair.
pub fn verify(token: &SignedToken) -> TokenClaims {
	verify_with(token, "rsa_2048_public.pem").expect("Token should verify against the test key.")
}

/// Extracts and verifies the bearer token of a captured `Authorization` header value.
pub fn verify_bearer(header: &str) -> TokenClaims {
	let token = header.strip_prefix("Bearer ").expect("Authorization must use the Bearer scheme.");
	let key = DecodingKey::from_rsa_pem(&fixture_bytes("rsa_2048_public.pem"))
		.expect("Public key fixture should parse.");

	jsonwebtoken::decode::<TokenClaims>(token, &key, &Validation::new(Algorithm::RS256))
		.expect("Bearer token should verify against the test key.")
		.claims
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Constructs a [`Dispatcher`] pointed at `base_url` over the insecure test transport.
pub fn build_reqwest_test_dispatcher(base_url: &str) -> Dispatcher<ReqwestHttpClient> {
	let config = ClientConfig::builder()
		.base_url(Url::parse(base_url).expect("Mock server base URL should parse."))
		.build()
		.expect("Test client configuration should be valid.");

	Dispatcher::with_http_client(&config, test_reqwest_http_client())
}
