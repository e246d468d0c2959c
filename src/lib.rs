//! Sign and send RS256 JWT-authenticated requests to a vault API.
//!
//! Every request carries a fresh token bound to its path and body, and every process reuses one
//! explicitly constructed HTTP client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod body;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod obs;
pub mod vault;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
