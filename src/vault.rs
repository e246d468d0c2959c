//! Typed vault-account calls built on the dispatcher.
//!
//! Account listing, lookup, creation, per-asset balances, and the supported-asset catalog are
//! modeled; any other endpoint can be reached through [`Dispatcher::dispatch`] directly.

// self
use crate::{
	_prelude::*,
	auth::TokenSigner,
	dispatch::Dispatcher,
	error::EncodingError,
	http::ApiHttpClient,
};

/// Path of the paged vault-account listing.
pub const ACCOUNTS_PAGED_PATH: &str = "/v1/vault/accounts_paged";
/// Path of the vault-account collection.
pub const ACCOUNTS_PATH: &str = "/v1/vault/accounts";
/// Path of the supported-asset catalog.
pub const SUPPORTED_ASSETS_PATH: &str = "/v1/supported_assets";

/// Body of a vault-account creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaultAccount {
	/// Display name.
	pub name: String,
	/// Hide the account in the web console.
	#[serde(rename = "hiddenOnUI")]
	pub hidden_on_ui: bool,
	/// Caller-side reference identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customer_ref_id: Option<String>,
	/// Enable automatic gas top-ups.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub auto_fuel: Option<bool>,
}
impl CreateVaultAccount {
	/// Creates a request with only the required fields set.
	pub fn new(name: impl Into<String>, hidden_on_ui: bool) -> Self {
		Self { name: name.into(), hidden_on_ui, customer_ref_id: None, auto_fuel: None }
	}

	/// Sets the caller-side reference identifier.
	pub fn with_customer_ref_id(mut self, customer_ref_id: impl Into<String>) -> Self {
		self.customer_ref_id = Some(customer_ref_id.into());

		self
	}

	/// Enables or disables automatic gas top-ups.
	pub fn with_auto_fuel(mut self, auto_fuel: bool) -> Self {
		self.auto_fuel = Some(auto_fuel);

		self
	}
}

/// Vault account as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultAccount {
	/// Account identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Whether the account is hidden in the web console.
	#[serde(rename = "hiddenOnUI", default)]
	pub hidden_on_ui: bool,
	/// Caller-side reference identifier.
	#[serde(default)]
	pub customer_ref_id: Option<String>,
	/// Whether automatic gas top-ups are enabled.
	#[serde(default)]
	pub auto_fuel: bool,
	/// Asset balances held by the account.
	#[serde(default)]
	pub assets: Vec<VaultAsset>,
}

/// Balance of one asset inside a vault account.
///
/// Amounts are decimal strings exactly as the API returns them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultAsset {
	/// Asset identifier (for example `ETH`).
	pub id: String,
	/// Total balance.
	pub total: String,
	/// Spendable balance.
	#[serde(default)]
	pub available: Option<String>,
	/// Incoming, unconfirmed balance.
	#[serde(default)]
	pub pending: Option<String>,
	/// Balance locked by pending operations.
	#[serde(default)]
	pub locked_amount: Option<String>,
}

/// Asset listed in the supported-asset catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetType {
	/// Asset identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Asset class (for example `BASE_ASSET` or `ERC20`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Token contract address; empty for base assets.
	#[serde(default)]
	pub contract_address: String,
	/// Identifier of the chain's native asset.
	#[serde(default)]
	pub native_asset: String,
	/// Decimal places, when published.
	#[serde(default)]
	pub decimals: Option<i64>,
}

/// Cursor pair for paged listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
	/// Cursor of the previous page.
	#[serde(default)]
	pub before: Option<String>,
	/// Cursor of the next page.
	#[serde(default)]
	pub after: Option<String>,
}

/// One page of vault accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedVaultAccounts {
	/// Accounts on this page.
	pub accounts: Vec<VaultAccount>,
	/// Cursors, when more pages exist.
	#[serde(default)]
	pub paging: Option<Paging>,
	/// Ready-made URL of the previous page.
	#[serde(default)]
	pub previous_url: Option<String>,
	/// Ready-made URL of the next page.
	#[serde(default)]
	pub next_url: Option<String>,
}

impl<C> Dispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the first page of vault accounts.
	///
	/// Non-2xx answers surface as [`Error::Api`].
	pub async fn list_vault_accounts_paged(
		&self,
		signer: &TokenSigner,
	) -> Result<PagedVaultAccounts> {
		self.get(ACCOUNTS_PAGED_PATH, signer).await?.error_for_status()?.json()
	}

	/// Fetches one vault account by identifier.
	pub async fn get_vault_account(
		&self,
		account_id: &str,
		signer: &TokenSigner,
	) -> Result<VaultAccount> {
		let path = format!("{ACCOUNTS_PATH}/{}", segment(account_id)?);

		self.get(&path, signer).await?.error_for_status()?.json()
	}

	/// Fetches the balance of one asset inside a vault account.
	pub async fn get_vault_asset(
		&self,
		account_id: &str,
		asset_id: &str,
		signer: &TokenSigner,
	) -> Result<VaultAsset> {
		let path = format!("{ACCOUNTS_PATH}/{}/{}", segment(account_id)?, segment(asset_id)?);

		self.get(&path, signer).await?.error_for_status()?.json()
	}

	/// Lists every asset the workspace can hold.
	pub async fn list_supported_assets(&self, signer: &TokenSigner) -> Result<Vec<AssetType>> {
		self.get(SUPPORTED_ASSETS_PATH, signer).await?.error_for_status()?.json()
	}

	/// Creates a vault account and returns it as stored by the API.
	pub async fn create_vault_account(
		&self,
		request: &CreateVaultAccount,
		signer: &TokenSigner,
	) -> Result<VaultAccount> {
		self.post(ACCOUNTS_PATH, request, signer).await?.error_for_status()?.json()
	}
}

// Identifiers are interpolated into the path, so they must not add segments or a query.
fn segment(id: &str) -> Result<&str, EncodingError> {
	if id.is_empty() || id.contains(['/', '?', '#']) {
		return Err(EncodingError::InvalidPath { path: id.to_owned() });
	}

	Ok(id)
}
