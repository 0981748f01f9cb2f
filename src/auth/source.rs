//! Token source contract plus the built-in static and environment-backed sources.
//!
//! A [`TokenSource`] is consulted once per outgoing request. Sources own their refresh and
//! caching policy; the pipeline never caches credentials itself.

// std
use std::env;
// self
use crate::{_prelude::*, auth::Credential, error::CredentialError};

/// Boxed future returned by [`TokenSource::token`].
pub type TokenFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Credential, CredentialError>> + 'a + Send>>;

/// Produces a fresh [`Credential`] on demand; may block on refresh or fail.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns the credential to stamp onto the next request.
	fn token(&self) -> TokenFuture<'_>;
}

/// Token source that always yields the same credential.
#[derive(Clone, Debug)]
pub struct StaticTokenSource(Credential);
impl StaticTokenSource {
	/// Wraps a pre-built credential.
	pub fn new(credential: Credential) -> Self {
		Self(credential)
	}

	/// Builds a source that yields `Bearer <token>`.
	pub fn bearer(token: impl Into<String>) -> Self {
		Self(Credential::bearer(token))
	}
}
impl TokenSource for StaticTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(async move { Ok(self.0.clone()) })
	}
}

/// Token source that re-reads an environment variable on every call.
#[derive(Clone, Debug)]
pub struct EnvTokenSource {
	variable: String,
	token_type: String,
}
impl EnvTokenSource {
	/// Variable consulted by [`EnvTokenSource::default`].
	pub const DEFAULT_VARIABLE: &'static str = "GITHUB_TOKEN";

	/// Reads the token from `variable` and stamps it with the `Bearer` scheme.
	pub fn new(variable: impl Into<String>) -> Self {
		Self { variable: variable.into(), token_type: "Bearer".into() }
	}

	/// Overrides the scheme name.
	pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = token_type.into();

		self
	}

	fn read(&self) -> Result<Credential, CredentialError> {
		let value = env::var(&self.variable)
			.ok()
			.filter(|value| !value.trim().is_empty())
			.ok_or_else(|| CredentialError::MissingEnv { variable: self.variable.clone() })?;

		Ok(Credential::new(self.token_type.clone(), value.trim()))
	}
}
impl Default for EnvTokenSource {
	fn default() -> Self {
		Self::new(Self::DEFAULT_VARIABLE)
	}
}
impl TokenSource for EnvTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(async move { self.read() })
	}
}
