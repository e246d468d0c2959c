// self
use crate::obs::CallOutcome;

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(method: &http::Method, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"signed_api_client_request_total",
			"method" => method.as_str().to_owned(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}
