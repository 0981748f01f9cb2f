//! Authenticated request pipeline shared by every API call of a client.
//!
//! One [`Pipeline::execute`] call runs the following loop until it succeeds, fails permanently,
//! or exhausts its [`RetryBudget`]:
//!
//! 1. apply the visitor chain (authorization first, then default headers, then extra visitors),
//!    aborting without network I/O when a visitor fails;
//! 2. wait for a slot from the configured [`RateLimitPolicy`];
//! 3. dispatch through the [`HttpTransport`] under the per-request timeout;
//! 4. classify the response, mapping non-2xx statuses to [`ApiError`].
//!
//! Every wait is raced against the caller's [`CallContext`] deadline, and dropping the returned
//! future aborts the call at the next await point.

pub mod retry;

pub use retry::*;

// crates.io
use http::{
	HeaderMap, HeaderValue, Method,
	header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
};
use serde_json::Value;
use tokio::time::Instant;
// self
use crate::{
	_prelude::*,
	config::{ClientConfig, GITHUB_API_VERSION},
	error::{ApiError, ConfigError, SerializationError, TransportError},
	ext::{
		AuthorizationVisitor, DefaultHeadersVisitor, PerSecondLimiter, RateLimitContext,
		RateLimitDecision, RateLimitPolicy, RequestVisitor,
	},
	obs::{self, RequestOutcome, RequestSpan},
	transport::{ApiRequest, ApiResponse, HttpTransport},
};

/// Per-call metadata threaded through the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct CallContext {
	/// Logical operation name used for spans, metrics, and deadline errors.
	pub operation: &'static str,
	/// Instant after which every pending wait fails with [`Error::DeadlineExceeded`].
	pub deadline: Option<Instant>,
}
impl CallContext {
	/// Creates a context without a deadline.
	pub fn new(operation: &'static str) -> Self {
		Self { operation, deadline: None }
	}

	/// Attaches a deadline.
	pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
		self.deadline = deadline;

		self
	}

	/// Awaits `fut`, failing once the deadline passes.
	pub async fn guard<F>(&self, fut: F) -> Result<F::Output>
	where
		F: Future,
	{
		match self.deadline {
			Some(deadline) => tokio::time::timeout_at(deadline, fut)
				.await
				.map_err(|_| Error::DeadlineExceeded { operation: self.operation }),
			None => Ok(fut.await),
		}
	}
}

/// Composes visitors, rate limiting, timeouts, and retries around an [`HttpTransport`].
#[derive(Clone)]
pub struct Pipeline {
	config: Arc<ClientConfig>,
	transport: Arc<dyn HttpTransport>,
	rate_limit: Arc<dyn RateLimitPolicy>,
	visitors: Vec<Arc<dyn RequestVisitor>>,
}
impl Pipeline {
	/// Builds the pipeline from a validated configuration.
	pub fn new(config: Arc<ClientConfig>) -> Result<Self, ConfigError> {
		let transport = match &config.transport {
			Some(transport) => transport.clone(),
			#[cfg(feature = "reqwest")]
			None => Arc::new(crate::transport::ReqwestTransport::from_config(&config)?),
			#[cfg(not(feature = "reqwest"))]
			None => return Err(ConfigError::MissingTransport),
		};
		let rate_limit = match &config.rate_limit_policy {
			Some(policy) => policy.clone(),
			None => Arc::new(PerSecondLimiter::new(config.rate_limit_per_second)),
		};
		let mut defaults = HeaderMap::new();

		defaults.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
		defaults.insert("x-github-api-version", HeaderValue::from_static(GITHUB_API_VERSION));
		defaults.insert(
			USER_AGENT,
			HeaderValue::from_str(&config.user_agent)
				.map_err(|_| ConfigError::InvalidHeader { name: "user-agent" })?,
		);

		let mut visitors: Vec<Arc<dyn RequestVisitor>> = vec![
			Arc::new(AuthorizationVisitor::new(config.token_source.clone())),
			Arc::new(DefaultHeadersVisitor::new(defaults)),
		];

		visitors.extend(config.visitors.iter().cloned());

		Ok(Self { config, transport, rate_limit, visitors })
	}

	/// Shared configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Joins `path` onto the base URL; absolute URLs are used as-is.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let joined = if path.starts_with("http://") || path.starts_with("https://") {
			path.to_owned()
		} else {
			format!(
				"{}/{}",
				self.config.base_url.as_str().trim_end_matches('/'),
				path.trim_start_matches('/')
			)
		};

		Url::parse(&joined).map_err(|source| ConfigError::InvalidEndpoint { path: path.into(), source })
	}

	/// Executes the call and returns the successful (2xx) response.
	///
	/// `payload` is sent as query parameters for `GET` requests and as a JSON body otherwise.
	pub async fn execute<P>(
		&self,
		ctx: CallContext,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<ApiResponse>
	where
		P: ?Sized + Serialize,
	{
		let span = RequestSpan::new(ctx.operation, &method);

		span.instrument(async move {
			obs::record_request_outcome(ctx.operation, RequestOutcome::Attempt);

			let result = self.execute_inner(ctx, method, path, payload).await;
			let outcome =
				if result.is_ok() { RequestOutcome::Success } else { RequestOutcome::Failure };

			obs::record_request_outcome(ctx.operation, outcome);

			result
		})
		.await
	}

	/// Executes the call and decodes the response body into `T`.
	pub async fn execute_json<T, P>(
		&self,
		ctx: CallContext,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<T>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		let response = self.execute(ctx, method, path, payload).await?;
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
		let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			SerializationError::Decode { url: self.display_url(path), source }
		})?;

		deserializer.end().map_err(|source| SerializationError::TrailingData {
			url: self.display_url(path),
			source,
		})?;

		Ok(value)
	}

	/// Executes the call and discards the response body.
	pub async fn execute_empty<P>(
		&self,
		ctx: CallContext,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<()>
	where
		P: ?Sized + Serialize,
	{
		self.execute(ctx, method, path, payload).await.map(|_| ())
	}

	async fn execute_inner<P>(
		&self,
		ctx: CallContext,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<ApiResponse>
	where
		P: ?Sized + Serialize,
	{
		let mut url = self.endpoint(path)?;
		let body = match payload {
			Some(payload) if method == Method::GET => {
				append_query(&mut url, payload)?;

				None
			},
			Some(payload) => Some(serde_json::to_vec(payload).map_err(|source| {
				SerializationError::Encode { url: url.to_string(), source }
			})?),
			None => None,
		};
		let mut budget = RetryBudget::new(self.config.retry_timeout)
			.with_delays(self.config.retry_initial_delay, self.config.retry_max_delay);

		loop {
			let (result, retry_after) = self.attempt(ctx, &method, &url, body.as_deref()).await?;
			let error = match result {
				Ok(response) => return Ok(response),
				Err(error) => error,
			};
			let Some(delay) = budget.next_delay(&error, retry_after) else { return Err(error) };

			obs::log_retry(budget.attempts(), delay, &error);
			obs::record_request_outcome(ctx.operation, RequestOutcome::Retry);
			ctx.guard(tokio::time::sleep(delay)).await?;
		}
	}

	/// Runs one attempt. The outer `Result` carries failures that must never be retried (visitor
	/// and deadline errors); the inner one carries the attempt outcome plus any `Retry-After` hint.
	async fn attempt(
		&self,
		ctx: CallContext,
		method: &Method,
		url: &Url,
		body: Option<&[u8]>,
	) -> Result<(Result<ApiResponse>, Option<StdDuration>)> {
		let mut request = ApiRequest::new(method.clone(), url.clone());

		if let Some(body) = body {
			request.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
			request.body = Some(body.to_vec());
		}
		for visitor in &self.visitors {
			ctx.guard(visitor.visit(&mut request)).await??;
		}

		self.wait_for_slot(ctx).await?;

		obs::log_request(method, url, &request.headers, self.config.debug_headers);

		let timeout = self.config.http_timeout;
		let sent = ctx.guard(tokio::time::timeout(timeout, self.transport.send(request))).await?;
		let response = match sent {
			Ok(Ok(response)) => response,
			Ok(Err(e)) => return Ok((Err(e.into()), None)),
			Err(_) =>
				return Ok((Err(TransportError::Timeout { url: url.to_string(), timeout }.into()), None)),
		};

		obs::log_response(
			response.status,
			&response.headers,
			&self.config.truncate_body(&response.body),
			self.config.debug_headers,
		);

		if response.status.is_success() {
			return Ok((Ok(response), None));
		}

		let retry_after = response.retry_after();

		Ok((Err(self.api_error(method, url, &response).into()), retry_after))
	}

	async fn wait_for_slot(&self, ctx: CallContext) -> Result<()> {
		match self.rate_limit.evaluate(&RateLimitContext::new(ctx.operation)) {
			RateLimitDecision::Allow => Ok(()),
			RateLimitDecision::Delay(directive) => {
				obs::log_rate_limit_delay(directive.recommended_backoff, directive.reason.as_deref());
				ctx.guard(tokio::time::sleep_until(directive.earliest_retry_at)).await
			},
		}
	}

	fn api_error(&self, method: &Method, url: &Url, response: &ApiResponse) -> ApiError {
		#[derive(Deserialize)]
		struct GitHubErrorBody {
			message: Option<String>,
		}

		let message = serde_json::from_slice::<GitHubErrorBody>(&response.body)
			.ok()
			.and_then(|body| body.message);

		ApiError {
			method: method.to_string(),
			url: url.to_string(),
			status: response.status.as_u16(),
			body: self.config.truncate_body(&response.body),
			message,
			rate_limit: response.rate_limit(),
		}
	}

	fn display_url(&self, path: &str) -> String {
		self.endpoint(path).map(String::from).unwrap_or_else(|_| path.to_owned())
	}
}
impl Debug for Pipeline {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Pipeline")
			.field("config", &self.config)
			.field("visitors", &self.visitors.len())
			.finish_non_exhaustive()
	}
}

fn append_query<P>(url: &mut Url, payload: &P) -> Result<(), SerializationError>
where
	P: ?Sized + Serialize,
{
	let value = serde_json::to_value(payload)
		.map_err(|source| SerializationError::Encode { url: url.to_string(), source })?;
	let fields = match value {
		Value::Null => return Ok(()),
		Value::Object(fields) => fields,
		_ => return Err(SerializationError::QueryShape { url: url.to_string() }),
	};
	let mut pairs = Vec::with_capacity(fields.len());

	for (key, value) in fields {
		let value = match value {
			Value::Null => continue,
			Value::String(s) => s,
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => n.to_string(),
			Value::Array(_) | Value::Object(_) =>
				return Err(SerializationError::QueryShape { url: url.to_string() }),
		};

		pairs.push((key, value));
	}

	if !pairs.is_empty() {
		url.query_pairs_mut().extend_pairs(pairs);
	}

	Ok(())
}
