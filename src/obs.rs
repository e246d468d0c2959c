//! Optional observability helpers for dispatched calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to run every dispatch inside a span named
//!   `signed_api_client.dispatch` carrying the `method` and `path` fields, and to emit debug
//!   events when keys load and tokens are issued.
//! - Enable `metrics` to increment the `signed_api_client_request_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Emits a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug_event {
	($($arg:tt)*) => {
		#[cfg(feature = "tracing")]
		::tracing::debug!($($arg)*);
	};
}
pub(crate) use debug_event;

/// Outcome labels recorded for each dispatched call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to the dispatcher.
	Attempt,
	/// A response was fully received (any status).
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
