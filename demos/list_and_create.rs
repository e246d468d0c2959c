//! Lists vault accounts and creates a new one against a live API origin.
//!
//! Reads `API_KEY` and `SECRET_KEY_PATH` from the environment; `API_BASE_URL` optionally
//! overrides the production origin (for example with the sandbox one). Each call reports its
//! own outcome so a failed listing does not prevent the creation attempt.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::WrapErr};
use serde_json::json;
// self
use signed_api_client::{
	auth::{ApiKey, TokenSigner},
	config::ClientConfig,
	dispatch::{ApiResponse, ReqwestDispatcher},
	error::Result as ApiResult,
	url::Url,
	vault::{ACCOUNTS_PAGED_PATH, ACCOUNTS_PATH},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let api_key = ApiKey::new(env::var("API_KEY").wrap_err("API_KEY must be set.")?)?;
	let key_path = env::var("SECRET_KEY_PATH").wrap_err("SECRET_KEY_PATH must be set.")?;
	let mut config = ClientConfig::builder();

	if let Ok(base_url) = env::var("API_BASE_URL") {
		config = config.base_url(Url::parse(&base_url)?);
	}

	let config = config.build()?;
	let signer = TokenSigner::from_pem_file(&key_path, api_key)?.configured(&config);
	let dispatcher = ReqwestDispatcher::new(&config)?;

	report("List accounts", dispatcher.get(ACCOUNTS_PAGED_PATH, &signer).await);
	report(
		"Create account",
		dispatcher
			.post(ACCOUNTS_PATH, &json!({ "name": "MyGoVault", "hiddenOnUI": true }), &signer)
			.await,
	);

	Ok(())
}

fn report(label: &str, outcome: ApiResult<ApiResponse>) {
	match outcome {
		Ok(response) => println!("{label}: {} {}", response.status(), response.text()),
		Err(e) => eprintln!("{label} failed: {e}."),
	}
}
