// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by the dispatcher.
#[derive(Clone, Debug)]
pub struct DispatchSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl DispatchSpan {
	/// Creates a new span tagged with the request method + path.
	pub fn new(method: &http::Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"signed_api_client.dispatch",
				method = method.as_str(),
				path,
				status = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Records the response status once it is known.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("status", status);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
