//! Typed GitHub operations layered over the request pipeline.
//!
//! Each operation builds its endpoint from path segments interpolated verbatim, picks the verb,
//! attaches an optional payload, and declares the response shape. Errors are exactly those of
//! the underlying [`Pipeline`] call; no validation happens above the HTTP checks. Create and edit
//! operations perform one remote mutation per call and carry no idempotency key.

mod actions;
mod commits;
mod pulls;
mod releases;
mod repos;

// crates.io
use tokio::time::Instant;
// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	pipeline::{CallContext, Pipeline},
};

/// Cheap-to-clone handle over a shared pipeline and configuration.
#[derive(Clone, Debug)]
pub struct GitHubClient {
	pipeline: Arc<Pipeline>,
	deadline: Option<Instant>,
}
impl GitHubClient {
	/// Builds a client from a validated configuration.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let pipeline = Pipeline::new(Arc::new(config))?;

		Ok(Self { pipeline: Arc::new(pipeline), deadline: None })
	}

	/// Returns a handle whose calls fail with [`Error::DeadlineExceeded`] once `deadline` passes.
	///
	/// The handle shares the pipeline (and therefore the rate limiter) with `self`.
	pub fn with_deadline(&self, deadline: Instant) -> Self {
		Self { pipeline: self.pipeline.clone(), deadline: Some(deadline) }
	}

	/// Returns a handle whose calls fail once `timeout` has elapsed from now.
	pub fn with_timeout(&self, timeout: StdDuration) -> Self {
		self.with_deadline(Instant::now() + timeout)
	}

	/// Underlying pipeline, for endpoints this crate does not wrap.
	pub fn pipeline(&self) -> &Pipeline {
		&self.pipeline
	}

	/// Shared configuration.
	pub fn config(&self) -> &ClientConfig {
		self.pipeline.config()
	}

	fn context(&self, operation: &'static str) -> CallContext {
		CallContext::new(operation).with_deadline(self.deadline)
	}
}
