//! Signs a single request token offline and prints its decoded claims.
//!
//! Usage: `cargo run --example sign_token -- <private-key.pem> <api-key> [path] [json-body]`.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use signed_api_client::{
	auth::{ApiKey, TokenSigner},
	body::RequestBody,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let key_path = args.next().ok_or_else(|| eyre!("Missing private key path."))?;
	let api_key = ApiKey::new(args.next().ok_or_else(|| eyre!("Missing API key."))?)?;
	let path = args.next().unwrap_or_else(|| "/v1/vault/accounts_paged".into());
	let body = args
		.next()
		.map(|raw| serde_json::from_str::<serde_json::Value>(&raw))
		.transpose()?
		.map(|value| RequestBody::json(&value))
		.transpose()?;
	let signer = TokenSigner::from_pem_file(key_path, api_key)?;
	let token = signer.sign(&path, body.as_ref())?;
	let claims = token.claims()?;

	println!("{}", token.expose());
	println!("{}", serde_json::to_string_pretty(&claims)?);

	Ok(())
}
