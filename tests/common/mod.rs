//! Helpers shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	env,
	path::PathBuf,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use httpmock::MockServer;
// self
use octoclient::{
	auth::{Credential, TokenFuture, TokenSource},
	client::GitHubClient,
	config::{ClientConfig, ClientConfigBuilder},
	url::Url,
};

/// Token source that mints `token secret-<n>` on its n-th call.
#[derive(Debug, Default)]
pub struct CountingTokenSource {
	calls: AtomicUsize,
}
impl CountingTokenSource {
	/// Number of credentials handed out so far.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl TokenSource for CountingTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(async move {
			let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

			Ok(Credential::new("token", format!("secret-{n}")))
		})
	}
}

/// Configuration builder pointed at the mock server with a permissive rate limit.
pub fn test_config(server: &MockServer, source: Arc<dyn TokenSource>) -> ClientConfigBuilder {
	ClientConfig::builder(source)
		.base_url(Url::parse(&server.base_url()).expect("Mock server URL should parse."))
		.rate_limit_per_second(1_000)
		.retry_timeout(Duration::from_secs(2))
		.http_timeout(Duration::from_secs(5))
}

/// Client pointed at the mock server.
pub fn build_test_client(server: &MockServer, source: Arc<dyn TokenSource>) -> GitHubClient {
	let config = test_config(server, source).build().expect("Test configuration should be valid.");

	GitHubClient::new(config).expect("Test client should build.")
}

/// Unique scratch directory under the system temp dir.
pub fn temp_dir(label: &str) -> PathBuf {
	let nanos = std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_nanos())
		.unwrap_or_default();

	env::temp_dir().join(format!("octoclient-it-{label}-{}-{nanos}", std::process::id()))
}
