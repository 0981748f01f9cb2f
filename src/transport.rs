//! Transport primitives for GitHub API calls.
//!
//! The module exposes [`HttpTransport`] alongside the crate-owned [`ApiRequest`] and
//! [`ApiResponse`] shapes so downstream crates can plug in custom HTTP stacks (or test doubles)
//! without depending on reqwest. The pipeline owns every cross-cutting policy; a transport only
//! performs a single exchange and classifies its own failures.

// crates.io
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header::RETRY_AFTER};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing a single API exchange.
///
/// Implementations must not retry, throttle, or authenticate on their own; those concerns are
/// configured on the [`Pipeline`](crate::pipeline::Pipeline). Non-2xx responses are returned as
/// regular [`ApiResponse`] values. Only failures to obtain a response become [`TransportError`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends the request and buffers the response body.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Outbound request assembled by the API surface and mutated by request visitors.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Fully-qualified request URL (query included).
	pub url: Url,
	/// Request headers; visitors add `Authorization` here.
	pub headers: HeaderMap,
	/// Encoded JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request without headers or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Inserts or replaces a header.
	pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
		self.headers.insert(name, value);
	}
}

/// Buffered response returned by an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from its parts.
	pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers, body: body.into() }
	}

	/// Rate-limit headers advertised by GitHub, when all three are present.
	pub fn rate_limit(&self) -> Option<RateLimitSnapshot> {
		RateLimitSnapshot::from_headers(&self.headers)
	}

	/// `Retry-After` hint expressed as a relative duration.
	pub fn retry_after(&self) -> Option<StdDuration> {
		parse_retry_after(&self.headers)
	}
}

/// Rate-limit budget advertised through GitHub's `x-ratelimit-*` headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
	/// Maximum requests allowed in the current window.
	pub limit: u64,
	/// Requests remaining in the current window.
	pub remaining: u64,
	/// Window reset instant as a Unix timestamp.
	pub reset: i64,
}
impl RateLimitSnapshot {
	/// Parses the snapshot from response headers.
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		fn header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
			headers.get(name)?.to_str().ok()?.trim().parse().ok()
		}

		Some(Self {
			limit: header(headers, "x-ratelimit-limit")?,
			remaining: header(headers, "x-ratelimit-remaining")?,
			reset: header(headers, "x-ratelimit-reset")?,
		})
	}

	/// Returns `true` when the primary budget is spent.
	pub fn is_exhausted(&self) -> bool {
		self.remaining == 0
	}

	/// Window reset instant, if the timestamp is representable.
	pub fn reset_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.reset).ok()
	}
}

/// Thin wrapper around [`reqwest::Client`] so shared HTTP behavior lives in one place.
///
/// Build it with [`ReqwestTransport::from_config`] to honour the TLS verification flag, or wrap
/// an existing client with [`ReqwestTransport::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub reqwest::Client);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest client.
	pub fn with_client(client: reqwest::Client) -> Self {
		Self(client)
	}

	/// Builds a client honouring the TLS verification setting.
	///
	/// The per-request timeout is enforced by the pipeline, not by reqwest.
	pub fn from_config(
		config: &crate::config::ClientConfig,
	) -> Result<Self, crate::error::ConfigError> {
		let client = reqwest::Client::builder()
			.danger_accept_invalid_certs(config.insecure_skip_verify)
			.danger_accept_invalid_hostnames(config.insecure_skip_verify)
			.build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let url = request.url.to_string();
			let mut builder =
				self.0.request(request.method, request.url).headers(request.headers);

			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(|e| map_reqwest_error(&url, e))?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(|e| map_reqwest_error(&url, e))?;

			Ok(ApiResponse::new(status, headers, body.to_vec()))
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(url: &str, e: reqwest::Error) -> TransportError {
	let retryable = e.is_timeout() || e.is_connect() || e.is_request() || e.is_body();

	TransportError::network(url, retryable, e)
}

fn parse_retry_after(headers: &HeaderMap) -> Option<StdDuration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(StdDuration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return StdDuration::try_from(delta).ok();
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
		let mut map = HeaderMap::new();

		for (name, value) in pairs {
			map.insert(
				HeaderName::from_static(*name),
				HeaderValue::from_str(value).expect("Header fixture should be valid."),
			);
		}

		map
	}

	#[test]
	fn rate_limit_snapshot_requires_all_headers() {
		let full = headers(&[
			("x-ratelimit-limit", "5000"),
			("x-ratelimit-remaining", "0"),
			("x-ratelimit-reset", "1700000000"),
		]);
		let snapshot =
			RateLimitSnapshot::from_headers(&full).expect("All rate limit headers are present.");

		assert_eq!(snapshot.limit, 5000);
		assert!(snapshot.is_exhausted());
		assert_eq!(
			snapshot.reset_at().map(OffsetDateTime::unix_timestamp),
			Some(1_700_000_000)
		);

		let partial = headers(&[("x-ratelimit-limit", "5000")]);

		assert!(RateLimitSnapshot::from_headers(&partial).is_none());
	}

	#[test]
	fn retry_after_accepts_seconds() {
		let response = ApiResponse::new(
			StatusCode::TOO_MANY_REQUESTS,
			headers(&[("retry-after", "7")]),
			Vec::new(),
		);

		assert_eq!(response.retry_after(), Some(StdDuration::from_secs(7)));
	}

	#[test]
	fn retry_after_ignores_dates_in_the_past() {
		let response = ApiResponse::new(
			StatusCode::SERVICE_UNAVAILABLE,
			headers(&[("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")]),
			Vec::new(),
		);

		assert_eq!(response.retry_after(), None);
	}
}
