//! Optional observability helpers for pipeline calls and cache loads.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `octoclient.request` with the `operation`
//!   (API surface call) and `method` (HTTP verb) fields, plus debug events for headers, bodies,
//!   retries, and cache decisions.
//! - Enable `metrics` to increment the `octoclient_request_total` counter for every
//!   attempt/success/failure (labeled by `operation` + `outcome`) and the `octoclient_cache_total`
//!   counter for every cache decision (labeled by `cache` + `outcome`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each pipeline call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to the pipeline.
	Attempt,
	/// A transient failure consumed part of the retry budget.
	Retry,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Retry => "retry",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Decisions taken by a TTL cache load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheOutcome {
	/// Fresh entry served from the store.
	Hit,
	/// No entry stored under the key.
	Miss,
	/// Entry older than the TTL.
	Stale,
	/// Entry could not be decoded.
	Corrupt,
	/// Store read failed and the load fell back to computing.
	StoreError,
}
impl CacheOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheOutcome::Hit => "hit",
			CacheOutcome::Miss => "miss",
			CacheOutcome::Stale => "stale",
			CacheOutcome::Corrupt => "corrupt",
			CacheOutcome::StoreError => "store_error",
		}
	}
}
impl Display for CacheOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
