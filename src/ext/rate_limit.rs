//! Rate limit policy contracts consulted before every outbound request.
//!
//! Policies reserve capacity synchronously and answer with a [`RateLimitDecision`]; the pipeline
//! performs the actual wait so a dropped call never leaves a task sleeping in the background.

// crates.io
use tokio::time::Instant;
// self
use crate::_prelude::*;

/// Strategy that decides whether the next call may proceed or must wait.
pub trait RateLimitPolicy
where
	Self: Send + Sync,
{
	/// Reserves capacity for the call described by `context`.
	fn evaluate(&self, context: &RateLimitContext) -> RateLimitDecision;
}

/// Context shared with a [`RateLimitPolicy`] before an outbound call is made.
#[derive(Clone, Debug)]
pub struct RateLimitContext {
	/// Logical operation being attempted.
	pub operation: &'static str,
	/// Instant the pipeline observed before invoking the policy.
	pub observed_at: Instant,
}
impl RateLimitContext {
	/// Creates a new context for `operation` observed now.
	pub fn new(operation: &'static str) -> Self {
		Self { operation, observed_at: Instant::now() }
	}

	/// Overrides the instant associated with the observation.
	pub fn with_observed_at(mut self, instant: Instant) -> Self {
		self.observed_at = instant;

		self
	}
}

/// Result emitted by a [`RateLimitPolicy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
	/// The request may proceed immediately.
	Allow,
	/// The request should be delayed.
	Delay(RetryDirective),
}

/// Advises callers when to proceed after a [`RateLimitDecision::Delay`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryDirective {
	/// Instant when it is safe to proceed.
	pub earliest_retry_at: Instant,
	/// Suggested wait measured from the observation instant.
	pub recommended_backoff: StdDuration,
	/// Optional descriptive string.
	pub reason: Option<String>,
}
impl RetryDirective {
	/// Creates a new directive with the provided timing metadata.
	pub fn new(earliest_retry_at: Instant, recommended_backoff: StdDuration) -> Self {
		Self { earliest_retry_at, recommended_backoff, reason: None }
	}

	/// Adds a human-readable reason.
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());

		self
	}
}

/// Spaces requests evenly so at most `per_second` start in any one-second window.
///
/// Every evaluation reserves the next free slot, so concurrent callers queue up instead of
/// failing. The slot state is the only shared mutable state of a client instance.
#[derive(Debug)]
pub struct PerSecondLimiter {
	interval: StdDuration,
	next_slot: Mutex<Option<Instant>>,
}
impl PerSecondLimiter {
	/// Creates a limiter allowing `per_second` requests per second (minimum one).
	pub fn new(per_second: u32) -> Self {
		let interval = StdDuration::from_secs(1) / per_second.max(1);

		Self { interval, next_slot: Mutex::new(None) }
	}

	/// Gap enforced between consecutive request starts.
	pub fn interval(&self) -> StdDuration {
		self.interval
	}
}
impl RateLimitPolicy for PerSecondLimiter {
	fn evaluate(&self, context: &RateLimitContext) -> RateLimitDecision {
		let now = context.observed_at;
		let mut next_slot = self.next_slot.lock();
		let slot = match *next_slot {
			Some(reserved) if reserved > now => reserved,
			_ => now,
		};

		*next_slot = Some(slot + self.interval);

		if slot <= now {
			RateLimitDecision::Allow
		} else {
			RateLimitDecision::Delay(
				RetryDirective::new(slot, slot - now)
					.with_reason(format!("{} waits for its rate limit slot", context.operation)),
			)
		}
	}
}
