// self
use crate::obs::{CacheOutcome, RequestOutcome};

/// Records a pipeline outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(operation: &'static str, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"octoclient_request_total",
			"operation" => operation,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records a cache decision via the global metrics recorder (when enabled).
pub fn record_cache_outcome(cache: &str, outcome: CacheOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"octoclient_cache_total",
			"cache" => cache.to_owned(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (cache, outcome);
	}
}
