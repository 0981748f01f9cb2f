// crates.io
use http::{HeaderMap, Method, StatusCode, header::AUTHORIZATION};
// self
use crate::{_prelude::*, obs::CacheOutcome};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by pipeline calls.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided operation + HTTP verb.
	pub fn new(operation: &'static str, method: &Method) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("octoclient.request", operation, method = method.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, method);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Renders headers as `name: value` lines with `Authorization` redacted.
pub fn redact_headers(headers: &HeaderMap) -> String {
	headers
		.iter()
		.map(|(name, value)| {
			if name == AUTHORIZATION {
				format!("{name}: <redacted>")
			} else {
				format!("{name}: {}", value.to_str().unwrap_or("<binary>"))
			}
		})
		.collect::<Vec<_>>()
		.join(", ")
}

/// Emits the outbound request line, plus its headers when `with_headers` is set.
pub fn log_request(method: &Method, url: &Url, headers: &HeaderMap, with_headers: bool) {
	#[cfg(feature = "tracing")]
	{
		if with_headers {
			tracing::debug!(%method, %url, headers = %redact_headers(headers), "Sending request.");
		} else {
			tracing::debug!(%method, %url, "Sending request.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, url, headers, with_headers);
	}
}

/// Emits the response status and truncated body, plus headers when `with_headers` is set.
pub fn log_response(status: StatusCode, headers: &HeaderMap, body: &str, with_headers: bool) {
	#[cfg(feature = "tracing")]
	{
		if with_headers {
			tracing::debug!(
				status = status.as_u16(),
				headers = %redact_headers(headers),
				body,
				"Received response."
			);
		} else {
			tracing::debug!(status = status.as_u16(), body, "Received response.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, headers, body, with_headers);
	}
}

/// Notes a retry scheduled after a transient failure.
pub fn log_retry(attempt: u32, delay: StdDuration, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(attempt, delay_ms = delay.as_millis() as u64, %reason, "Retrying request.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (attempt, delay, reason);
	}
}

/// Notes a wait imposed by the rate limit policy.
pub fn log_rate_limit_delay(delay: StdDuration, reason: Option<&str>) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(delay_ms = delay.as_millis() as u64, reason, "Waiting for rate limit slot.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (delay, reason);
	}
}

/// Notes a cache decision; corrupt entries and store failures are logged as warnings.
pub fn log_cache_outcome(key: &str, outcome: CacheOutcome, detail: Option<&dyn Display>) {
	#[cfg(feature = "tracing")]
	{
		let detail = detail.map(ToString::to_string);

		match outcome {
			CacheOutcome::Corrupt | CacheOutcome::StoreError =>
				tracing::warn!(key, outcome = outcome.as_str(), detail, "Cache entry unusable."),
			_ => tracing::debug!(key, outcome = outcome.as_str(), "Cache lookup."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (key, outcome, detail);
	}
}

/// Notes a computed value that could not be persisted.
pub fn log_persist_failure(key: &str, error: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(key, %error, "Cache entry could not be persisted.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (key, error);
	}
}
