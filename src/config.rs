//! Immutable client configuration and its builder.
//!
//! A [`ClientConfig`] is constructed once, wrapped in an [`Arc`], and shared read-only by every
//! request issued through one [`GitHubClient`](crate::client::GitHubClient).

// self
use crate::{
	_prelude::*,
	auth::TokenSource,
	error::ConfigError,
	ext::{RateLimitPolicy, RequestVisitor},
	pipeline::RetryBudget,
	transport::HttpTransport,
};

/// Public GitHub REST endpoint.
pub const GITHUB_API_BASE: &str = "https://api.github.com";
/// REST API version pinned through `X-GitHub-Api-Version`.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Immutable settings shared by every request of a client instance.
#[derive(Clone)]
pub struct ClientConfig {
	/// Credential provider consulted once per request.
	pub token_source: Arc<dyn TokenSource>,
	/// Base URL every endpoint path is joined onto.
	pub base_url: Url,
	/// Total time budget for one call including all retries.
	pub retry_timeout: StdDuration,
	/// First backoff step between retries.
	pub retry_initial_delay: StdDuration,
	/// Ceiling for a single backoff step.
	pub retry_max_delay: StdDuration,
	/// Timeout applied to each individual HTTP exchange.
	pub http_timeout: StdDuration,
	/// Skips TLS certificate and hostname verification when `true`.
	pub insecure_skip_verify: bool,
	/// Logs request and response headers (with `Authorization` redacted).
	pub debug_headers: bool,
	/// Maximum number of body bytes kept in debug logs and API errors.
	pub debug_truncate_bytes: usize,
	/// Requests-per-second ceiling for the client instance.
	pub rate_limit_per_second: u32,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Transport override; `None` selects the reqwest transport.
	pub transport: Option<Arc<dyn HttpTransport>>,
	/// Rate limit policy override; `None` selects a
	/// [`PerSecondLimiter`](crate::ext::PerSecondLimiter).
	pub rate_limit_policy: Option<Arc<dyn RateLimitPolicy>>,
	/// Visitors applied after the authorization and default-header visitors.
	pub visitors: Vec<Arc<dyn RequestVisitor>>,
}
impl ClientConfig {
	/// Default retry budget.
	pub const DEFAULT_RETRY_TIMEOUT: StdDuration = StdDuration::from_secs(300);
	/// Default per-request timeout.
	pub const DEFAULT_HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(60);
	/// Default debug body truncation length.
	pub const DEFAULT_DEBUG_TRUNCATE_BYTES: usize = 96;
	/// Default requests-per-second ceiling.
	pub const DEFAULT_RATE_LIMIT_PER_SECOND: u32 = 15;

	/// Returns a builder seeded with defaults and the provided token source.
	pub fn builder(token_source: Arc<dyn TokenSource>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(token_source)
	}

	/// Truncates `body` to [`debug_truncate_bytes`](Self::debug_truncate_bytes), respecting
	/// UTF-8 boundaries and noting how many bytes were dropped.
	pub fn truncate_body(&self, body: &[u8]) -> String {
		let text = String::from_utf8_lossy(body);
		let limit = self.debug_truncate_bytes;

		if text.len() <= limit {
			return text.into_owned();
		}

		let mut cut = limit;

		while !text.is_char_boundary(cut) {
			cut -= 1;
		}

		format!("{}... ({} more bytes)", &text[..cut], text.len() - cut)
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("base_url", &self.base_url.as_str())
			.field("retry_timeout", &self.retry_timeout)
			.field("retry_initial_delay", &self.retry_initial_delay)
			.field("retry_max_delay", &self.retry_max_delay)
			.field("http_timeout", &self.http_timeout)
			.field("insecure_skip_verify", &self.insecure_skip_verify)
			.field("debug_headers", &self.debug_headers)
			.field("debug_truncate_bytes", &self.debug_truncate_bytes)
			.field("rate_limit_per_second", &self.rate_limit_per_second)
			.field("user_agent", &self.user_agent)
			.field("transport_override", &self.transport.is_some())
			.field("rate_limit_policy_override", &self.rate_limit_policy.is_some())
			.field("visitors", &self.visitors.len())
			.finish()
	}
}

/// Builder for [`ClientConfig`] values.
pub struct ClientConfigBuilder {
	/// Credential provider consulted once per request.
	pub token_source: Arc<dyn TokenSource>,
	/// Optional base URL override; defaults to [`GITHUB_API_BASE`].
	pub base_url: Option<Url>,
	/// Total retry budget for one call.
	pub retry_timeout: StdDuration,
	/// First backoff step.
	pub retry_initial_delay: StdDuration,
	/// Backoff step ceiling.
	pub retry_max_delay: StdDuration,
	/// Per-request HTTP timeout.
	pub http_timeout: StdDuration,
	/// TLS verification toggle.
	pub insecure_skip_verify: bool,
	/// Header logging toggle.
	pub debug_headers: bool,
	/// Body truncation length for debug logs and API errors.
	pub debug_truncate_bytes: usize,
	/// Requests-per-second ceiling.
	pub rate_limit_per_second: u32,
	/// Optional `User-Agent` override.
	pub user_agent: Option<String>,
	/// Optional transport override.
	pub transport: Option<Arc<dyn HttpTransport>>,
	/// Optional rate limit policy override.
	pub rate_limit_policy: Option<Arc<dyn RateLimitPolicy>>,
	/// Extra request visitors.
	pub visitors: Vec<Arc<dyn RequestVisitor>>,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with defaults and the provided token source.
	pub fn new(token_source: Arc<dyn TokenSource>) -> Self {
		Self {
			token_source,
			base_url: None,
			retry_timeout: ClientConfig::DEFAULT_RETRY_TIMEOUT,
			retry_initial_delay: RetryBudget::INITIAL_DELAY,
			retry_max_delay: RetryBudget::MAX_DELAY,
			http_timeout: ClientConfig::DEFAULT_HTTP_TIMEOUT,
			insecure_skip_verify: false,
			debug_headers: false,
			debug_truncate_bytes: ClientConfig::DEFAULT_DEBUG_TRUNCATE_BYTES,
			rate_limit_per_second: ClientConfig::DEFAULT_RATE_LIMIT_PER_SECOND,
			user_agent: None,
			transport: None,
			rate_limit_policy: None,
			visitors: Vec::new(),
		}
	}

	/// Overrides the API base URL (GitHub Enterprise, mock servers).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the total retry budget for one call.
	pub fn retry_timeout(mut self, timeout: StdDuration) -> Self {
		self.retry_timeout = timeout;

		self
	}

	/// Sets the exponential backoff steps; `max_delay` is raised to at least `initial_delay`.
	pub fn retry_backoff(mut self, initial_delay: StdDuration, max_delay: StdDuration) -> Self {
		self.retry_initial_delay = initial_delay;
		self.retry_max_delay = max_delay;

		self
	}

	/// Sets the per-request HTTP timeout.
	pub fn http_timeout(mut self, timeout: StdDuration) -> Self {
		self.http_timeout = timeout;

		self
	}

	/// Disables TLS certificate verification.
	pub fn insecure_skip_verify(mut self, skip: bool) -> Self {
		self.insecure_skip_verify = skip;

		self
	}

	/// Enables header logging.
	pub fn debug_headers(mut self, enabled: bool) -> Self {
		self.debug_headers = enabled;

		self
	}

	/// Sets the body truncation length used by debug logs and API errors.
	pub fn debug_truncate_bytes(mut self, bytes: usize) -> Self {
		self.debug_truncate_bytes = bytes;

		self
	}

	/// Sets the requests-per-second ceiling.
	pub fn rate_limit_per_second(mut self, per_second: u32) -> Self {
		self.rate_limit_per_second = per_second;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Supplies a custom transport.
	pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
		self.transport = Some(transport);

		self
	}

	/// Supplies a custom rate limit policy in place of the per-second ceiling.
	pub fn rate_limit_policy(mut self, policy: Arc<dyn RateLimitPolicy>) -> Self {
		self.rate_limit_policy = Some(policy);

		self
	}

	/// Appends a request visitor.
	pub fn visitor(mut self, visitor: Arc<dyn RequestVisitor>) -> Self {
		self.visitors.push(visitor);

		self
	}

	/// Validates and freezes the configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(GITHUB_API_BASE)
				.map_err(|_| ConfigError::InvalidBaseUrl { url: GITHUB_API_BASE.into() })?,
		};

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl { url: base_url.to_string() });
		}
		if self.rate_limit_per_second == 0 {
			return Err(ConfigError::ZeroRateLimit);
		}
		if self.http_timeout.is_zero() {
			return Err(ConfigError::ZeroHttpTimeout);
		}

		Ok(ClientConfig {
			token_source: self.token_source,
			base_url,
			retry_timeout: self.retry_timeout,
			retry_initial_delay: self.retry_initial_delay,
			retry_max_delay: self.retry_max_delay.max(self.retry_initial_delay),
			http_timeout: self.http_timeout,
			insecure_skip_verify: self.insecure_skip_verify,
			debug_headers: self.debug_headers,
			debug_truncate_bytes: self.debug_truncate_bytes,
			rate_limit_per_second: self.rate_limit_per_second,
			user_agent: self
				.user_agent
				.unwrap_or_else(|| concat!("octoclient/", env!("CARGO_PKG_VERSION")).into()),
			transport: self.transport,
			rate_limit_policy: self.rate_limit_policy,
			visitors: self.visitors,
		})
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("base_url", &self.base_url.as_ref().map(Url::as_str))
			.field("rate_limit_per_second", &self.rate_limit_per_second)
			.finish_non_exhaustive()
	}
}
