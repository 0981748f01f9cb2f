//! Retry budget bounding how long one pipeline call may keep retrying.

// crates.io
use rand::Rng;
use tokio::time::Instant;
// self
use crate::_prelude::*;

/// Time-boxed exponential backoff shared by every attempt of a single call.
///
/// The budget starts when the call starts. Each transient failure asks for the next delay; once
/// the remaining budget cannot cover another wait the caller surfaces the last error.
#[derive(Clone, Debug)]
pub struct RetryBudget {
	started_at: Instant,
	budget: StdDuration,
	attempt: u32,
	initial_delay: StdDuration,
	max_delay: StdDuration,
	use_jitter: bool,
}
impl RetryBudget {
	/// First backoff step.
	pub const INITIAL_DELAY: StdDuration = StdDuration::from_millis(250);
	/// Ceiling for a single backoff step.
	pub const MAX_DELAY: StdDuration = StdDuration::from_secs(30);

	/// Starts a budget of `budget` measured from now.
	pub fn new(budget: StdDuration) -> Self {
		Self {
			started_at: Instant::now(),
			budget,
			attempt: 0,
			initial_delay: Self::INITIAL_DELAY,
			max_delay: Self::MAX_DELAY,
			use_jitter: true,
		}
	}

	/// Overrides the backoff steps.
	pub fn with_delays(mut self, initial_delay: StdDuration, max_delay: StdDuration) -> Self {
		self.initial_delay = initial_delay;
		self.max_delay = max_delay.max(initial_delay);

		self
	}

	#[cfg(test)]
	pub(crate) fn without_jitter(mut self) -> Self {
		self.use_jitter = false;

		self
	}

	/// Number of retries handed out so far.
	pub fn attempts(&self) -> u32 {
		self.attempt
	}

	/// Budget left before retries stop.
	pub fn remaining(&self) -> StdDuration {
		self.budget.saturating_sub(self.started_at.elapsed())
	}

	/// Returns the wait before the next attempt, or `None` when `error` must be surfaced.
	///
	/// A server supplied `retry_after` replaces the computed backoff; when it does not fit in the
	/// remaining budget the call gives up instead of retrying early.
	pub fn next_delay(
		&mut self,
		error: &Error,
		retry_after: Option<StdDuration>,
	) -> Option<StdDuration> {
		if !is_retryable(error) {
			return None;
		}

		let remaining = self.remaining();

		if remaining.is_zero() {
			return None;
		}

		let delay = match retry_after {
			Some(hint) if hint > remaining => return None,
			Some(hint) => hint,
			None => self.backoff(self.attempt + 1).min(remaining),
		};

		self.attempt += 1;

		Some(delay)
	}

	fn backoff(&self, attempt: u32) -> StdDuration {
		let exponent = attempt.saturating_sub(1).min(16);
		let delay = self.initial_delay.saturating_mul(1 << exponent).min(self.max_delay);

		if self.use_jitter {
			delay.mul_f64(rand::rng().random_range(0.75..=1.25))
		} else {
			delay
		}
	}
}

/// Returns `true` for failures worth spending retry budget on.
pub fn is_retryable(error: &Error) -> bool {
	match error {
		Error::Transport(e) => e.is_retryable(),
		Error::Api(e) => e.is_transient(),
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::{ApiError, CredentialError, TransportError};

	fn api_error(status: u16) -> Error {
		ApiError {
			method: "GET".into(),
			url: "https://api.github.com/user".into(),
			status,
			body: String::new(),
			message: None,
			rate_limit: None,
		}
		.into()
	}

	#[test]
	fn backoff_doubles_until_capped() {
		let mut budget = RetryBudget::new(StdDuration::from_secs(60))
			.with_delays(StdDuration::from_millis(100), StdDuration::from_millis(300))
			.without_jitter();
		let err = api_error(502);

		assert_eq!(budget.next_delay(&err, None), Some(StdDuration::from_millis(100)));
		assert_eq!(budget.next_delay(&err, None), Some(StdDuration::from_millis(200)));
		assert_eq!(budget.next_delay(&err, None), Some(StdDuration::from_millis(300)));
		assert_eq!(budget.attempts(), 3);
	}

	#[test]
	fn permanent_failures_are_not_retried() {
		let mut budget = RetryBudget::new(StdDuration::from_secs(60));

		assert_eq!(budget.next_delay(&api_error(403), None), None);
		assert_eq!(budget.next_delay(&api_error(404), None), None);
		assert_eq!(
			budget.next_delay(&CredentialError::Unavailable { message: "down".into() }.into(), None),
			None
		);
		assert_eq!(budget.attempts(), 0);
	}

	#[test]
	fn exhausted_budget_surfaces_the_error() {
		let mut budget = RetryBudget::new(StdDuration::ZERO);
		let err: Error = TransportError::Timeout {
			url: "https://api.github.com/user".into(),
			timeout: StdDuration::from_secs(1),
		}
		.into();

		assert_eq!(budget.next_delay(&err, None), None);
	}

	#[test]
	fn retry_after_is_honoured_when_it_fits() {
		let mut budget = RetryBudget::new(StdDuration::from_secs(10));
		let err = api_error(429);

		assert_eq!(
			budget.next_delay(&err, Some(StdDuration::from_secs(2))),
			Some(StdDuration::from_secs(2))
		);
		assert_eq!(budget.next_delay(&err, Some(StdDuration::from_secs(60))), None);
	}

	#[test]
	fn jitter_stays_within_a_quarter_of_the_step() {
		let mut budget = RetryBudget::new(StdDuration::from_secs(60))
			.with_delays(StdDuration::from_millis(400), StdDuration::from_secs(1));
		let delay = budget.next_delay(&api_error(503), None).expect("503 should be retried.");

		assert!(delay >= StdDuration::from_millis(300) && delay <= StdDuration::from_millis(500));
	}
}
