#![cfg(feature = "reqwest")]

mod common;

// std
use std::collections::HashSet;
// crates.io
use serde_json::json;
use time::OffsetDateTime;
// self
use common::*;
use signed_api_client::{
	auth::{ApiKey, DEFAULT_TOKEN_VALIDITY, TokenSigner, body_hash},
	body::RequestBody,
	error::Error,
};

#[test]
fn scenario_create_account_token_verifies_and_binds_body() {
	let signer = test_signer();
	let body = RequestBody::json(&json!({ "name": "MyGoVault", "hiddenOnUI": true }))
		.expect("Scenario body should serialize.");
	let token = signer.sign("/v1/vault/accounts", Some(&body)).expect("Signing should succeed.");
	let claims = verify(&token);

	assert_eq!(claims.uri, "/v1/vault/accounts");
	assert_eq!(claims.sub, TEST_API_KEY);
	assert_eq!(claims.body_hash, body_hash(br#"{"hiddenOnUI":true,"name":"MyGoVault"}"#));
	assert_eq!(claims.exp, claims.iat + 55);
}

#[test]
fn repeated_signing_of_the_same_path_differs_only_in_nonce_and_time() {
	let signer = test_signer();
	let first = signer.sign("/v1/vault/accounts_paged", None).expect("First signing should succeed.");
	let second =
		signer.sign("/v1/vault/accounts_paged", None).expect("Second signing should succeed.");
	let (first, second) = (verify(&first), verify(&second));

	assert_ne!(first.nonce, second.nonce);
	assert!(second.iat >= first.iat);
	assert_eq!(first.uri, second.uri);
	assert_eq!(first.sub, second.sub);
	assert_eq!(first.body_hash, second.body_hash);
}

#[test]
fn expiry_tracks_issue_time_and_wall_clock() {
	let signer = test_signer();
	let before = OffsetDateTime::now_utc().unix_timestamp();
	let claims = verify(&signer.sign("/v1/vault/accounts_paged", None).expect("Signing works."));
	let after = OffsetDateTime::now_utc().unix_timestamp();

	assert!(claims.iat >= before && claims.iat <= after);
	assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_VALIDITY.whole_seconds());
}

#[test]
fn nonces_are_unique_across_a_thousand_tokens() {
	let signer = test_signer();
	let nonces = (0..1_000)
		.map(|_| {
			signer
				.sign("/v1/vault/accounts_paged", None)
				.expect("Signing should succeed.")
				.claims()
				.expect("Payload should decode.")
				.nonce
		})
		.collect::<HashSet<_>>();

	assert_eq!(nonces.len(), 1_000);
}

#[test]
fn tokens_do_not_verify_under_another_key() {
	let token = test_signer().sign("/v1/vault/accounts", None).expect("Signing should succeed.");

	assert!(verify_with(&token, "rsa_2048_other_public.pem").is_err());
}

#[test]
fn pkcs8_private_keys_are_accepted() {
	let signer = TokenSigner::from_pem_file(
		fixture_path("rsa_2048_other_private.pem"),
		ApiKey::new(TEST_API_KEY).expect("Test API key should be valid."),
	)
	.expect("PKCS#8 keys should load.");
	let token = signer.sign("/v1/vault/accounts", None).expect("Signing should succeed.");
	let claims = verify_with(&token, "rsa_2048_other_public.pem")
		.expect("Token should verify against the matching public key.");

	assert_eq!(claims.sub, TEST_API_KEY);
}

#[test]
fn missing_key_file_fails_with_key_load() {
	let path = fixture_path("does_not_exist.pem");
	let err = TokenSigner::from_pem_file(&path, ApiKey::new(TEST_API_KEY).expect("Valid key."))
		.expect_err("A missing key file must not yield a signer.");

	match err {
		Error::KeyLoad { path: reported, source } => {
			assert_eq!(reported, path);
			assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[test]
fn signer_is_shareable_across_threads() {
	let signer = test_signer();
	let nonces = std::thread::scope(|scope| {
		let handles = (0..4)
			.map(|_| {
				scope.spawn(|| {
					signer
						.sign("/v1/vault/accounts_paged", None)
						.expect("Signing should succeed.")
						.claims()
						.expect("Payload should decode.")
						.nonce
				})
			})
			.collect::<Vec<_>>();

		handles
			.into_iter()
			.map(|handle| handle.join().expect("Signing thread should not panic."))
			.collect::<HashSet<_>>()
	});

	assert_eq!(nonces.len(), 4);
}
