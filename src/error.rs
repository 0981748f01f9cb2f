//! Client-level error types shared across the pipeline, API surface, and cache.

// self
use crate::{_prelude::*, transport::RateLimitSnapshot};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token source failed; the request was never sent.
	#[error(transparent)]
	Credential(#[from] CredentialError),
	/// Transport failure (DNS, TCP, TLS, timeout) after the retry budget ran out.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote API answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Payload could not be encoded or the response could not be decoded.
	#[error(transparent)]
	Serialization(#[from] SerializationError),

	/// The deadline attached to the client handle elapsed before the call completed.
	#[error("Deadline exceeded while calling {operation}.")]
	DeadlineExceeded {
		/// Logical operation that was interrupted.
		operation: &'static str,
	},
}
impl Error {
	/// HTTP status code carried by an [`Error::Api`] value.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot carry API paths.
	#[error("Base URL `{url}` must be an absolute http(s) URL.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint path could not be joined onto the base URL.
	#[error("Endpoint `{path}` could not be joined onto the base URL.")]
	InvalidEndpoint {
		/// Path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Rate limit ceiling must allow at least one request per second.
	#[error("The requests-per-second ceiling must be greater than zero.")]
	ZeroRateLimit,
	/// Per-request timeout must be positive.
	#[error("The HTTP timeout must be greater than zero.")]
	ZeroHttpTimeout,
	/// A default header value contains bytes HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: &'static str,
	},
	/// No transport was configured and the default reqwest transport is disabled.
	#[error("No HTTP transport configured; enable the `reqwest` feature or supply one.")]
	MissingTransport,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while acquiring a credential from a token source.
#[derive(Debug, ThisError)]
pub enum CredentialError {
	/// Token source could not provide a credential.
	#[error("Token source is unavailable: {message}.")]
	Unavailable {
		/// Source-supplied reason string.
		message: String,
	},
	/// Environment variable holding the token is missing or empty.
	#[error("Environment variable `{variable}` does not hold a token.")]
	MissingEnv {
		/// Variable name consulted.
		variable: String,
	},
	/// Credential cannot be rendered as an `Authorization` header.
	#[error("Credential cannot be encoded as an Authorization header.")]
	InvalidHeader,
	/// Token source failed with an arbitrary error.
	#[error("Token acquisition failed.")]
	Source {
		/// Underlying token source failure.
		#[source]
		source: BoxError,
	},
}
impl CredentialError {
	/// Wraps a token source failure.
	pub fn failed(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Source { source: Box::new(src) }
	}
}

/// Transport-level failures (network errors and timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Request URL.
		url: String,
		/// Whether the failure is worth retrying (connect/reset style errors).
		retryable: bool,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the per-request HTTP timeout.
	#[error("Request to {url} timed out after {timeout:?}.")]
	Timeout {
		/// Request URL.
		url: String,
		/// Configured per-request timeout.
		timeout: StdDuration,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		url: impl Into<String>,
		retryable: bool,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { url: url.into(), retryable, source: Box::new(src) }
	}

	/// Returns `true` when the retry budget may be spent on this failure.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::Network { retryable, .. } => *retryable,
			Self::Timeout { .. } => true,
		}
	}
}

/// Non-2xx response returned by the remote API.
#[derive(Clone, Debug)]
pub struct ApiError {
	/// HTTP method of the failing request.
	pub method: String,
	/// Request URL.
	pub url: String,
	/// HTTP status code.
	pub status: u16,
	/// Response body, truncated to the configured debug length.
	pub body: String,
	/// `message` field of a GitHub JSON error document, when present.
	pub message: Option<String>,
	/// Rate-limit headers observed on the response.
	pub rate_limit: Option<RateLimitSnapshot>,
}
impl ApiError {
	/// Returns the GitHub `message` field, falling back to the (truncated) body.
	pub fn summary(&self) -> &str {
		self.message.as_deref().unwrap_or(&self.body)
	}

	/// Returns `true` for statuses the pipeline treats as transient.
	pub fn is_transient(&self) -> bool {
		matches!(self.status, 429 | 500 | 502 | 503 | 504)
	}
}
impl Display for ApiError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {} failed with HTTP {}: {}", self.method, self.url, self.status, self.summary())
	}
}
impl StdError for ApiError {}

/// Encoding or decoding failures around request and response payloads.
#[derive(Debug, ThisError)]
pub enum SerializationError {
	/// Request payload could not be encoded.
	#[error("Request payload for {url} could not be encoded.")]
	Encode {
		/// Request URL.
		url: String,
		/// Underlying encoding failure.
		#[source]
		source: serde_json::Error,
	},
	/// GET payload does not flatten into query parameters.
	#[error("Request payload for {url} must be a flat JSON object to be sent as a query.")]
	QueryShape {
		/// Request URL.
		url: String,
	},
	/// Response body could not be decoded into the expected shape.
	#[error("Response from {url} could not be decoded at `{}`.", .source.path())]
	Decode {
		/// Request URL.
		url: String,
		/// Structured parsing failure with the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Response body holds more than one JSON value.
	#[error("Response from {url} has trailing data after the JSON document.")]
	TrailingData {
		/// Request URL.
		url: String,
		/// Parser failure at the first trailing byte.
		#[source]
		source: serde_json::Error,
	},
}
