mod common;

// std
use std::{net::TcpListener, sync::Arc, time::Duration};
// crates.io
use httpmock::prelude::*;
use tokio::time::Instant;
// self
use common::{CountingTokenSource, build_test_client, test_config};
use octoclient::{
	auth::{StaticTokenSource, TokenFuture, TokenSource},
	client::GitHubClient,
	config::ClientConfig,
	error::{CredentialError, Error, SerializationError, TransportError},
	url::Url,
};

struct BrokenTokenSource;
impl TokenSource for BrokenTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(async { Err(CredentialError::Unavailable { message: "keychain locked".into() }) })
	}
}

#[tokio::test]
async fn authorization_header_carries_the_fresh_credential_of_each_call() {
	let server = MockServer::start_async().await;
	let source = Arc::new(CountingTokenSource::default());
	let client = build_test_client(&server, source.clone());
	let first = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/repos/acme/widget")
				.header("authorization", "token secret-1")
				.header("accept", "application/vnd.github+json")
				.header("x-github-api-version", "2022-11-28");
			then.status(200).header("content-type", "application/json").body("{\"name\":\"widget\"}");
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget").header("authorization", "token secret-2");
			then.status(200).header("content-type", "application/json").body("{\"name\":\"widget\"}");
		})
		.await;

	client.get_repo("acme", "widget").await.expect("First call should succeed.");
	client.get_repo("acme", "widget").await.expect("Second call should succeed.");

	first.assert_calls_async(1).await;
	second.assert_calls_async(1).await;

	assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn token_failure_sends_nothing() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(BrokenTokenSource));
	let mock = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200).body("{}");
		})
		.await;
	let err = client.get_repo("acme", "widget").await.expect_err("Token failure should abort.");

	mock.assert_calls_async(0).await;

	assert!(matches!(err, Error::Credential(CredentialError::Unavailable { .. })));
}

#[tokio::test]
async fn permanent_errors_are_not_retried_and_bodies_are_truncated() {
	let server = MockServer::start_async().await;
	let config = test_config(&server, Arc::new(StaticTokenSource::bearer("t")))
		.debug_truncate_bytes(8)
		.build()
		.expect("Test configuration should be valid.");
	let client = GitHubClient::new(config).expect("Test client should build.");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget");
			then.status(422).body("validation failed for several reasons");
		})
		.await;
	let err = client.get_repo("acme", "widget").await.expect_err("422 should fail.");

	mock.assert_calls_async(1).await;

	let Error::Api(api) = err else { panic!("Expected an API error.") };

	assert_eq!(api.status, 422);
	assert_eq!(api.body, "validati... (29 more bytes)");
	assert!(api.message.is_none());
}

#[tokio::test]
async fn slow_responses_hit_the_per_request_timeout() {
	let server = MockServer::start_async().await;
	let config = test_config(&server, Arc::new(StaticTokenSource::bearer("t")))
		.http_timeout(Duration::from_millis(100))
		.retry_timeout(Duration::ZERO)
		.build()
		.expect("Test configuration should be valid.");
	let client = GitHubClient::new(config).expect("Test client should build.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget");
			then.status(200).delay(Duration::from_secs(2)).body("{}");
		})
		.await;

	let err = client.get_repo("acme", "widget").await.expect_err("Slow response should time out.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })));
}

#[tokio::test]
async fn client_deadline_interrupts_pending_calls() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(StaticTokenSource::bearer("t")));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget");
			then.status(200).delay(Duration::from_secs(2)).body("{}");
		})
		.await;

	let err = client
		.with_timeout(Duration::from_millis(100))
		.get_repo("acme", "widget")
		.await
		.expect_err("Deadline should fire first.");

	assert!(matches!(err, Error::DeadlineExceeded { operation: "get_repo" }));
}

#[tokio::test]
async fn decode_errors_report_the_json_path() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(StaticTokenSource::bearer("t")));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/acme/repos");
			then.status(200).body("[{\"name\":\"x\",\"stargazers_count\":\"many\"}]");
		})
		.await;

	let err = client.list_repositories("acme").await.expect_err("Bad payload should fail.");

	assert!(matches!(err, Error::Serialization(_)));
	assert!(err.to_string().contains("[0].stargazers_count"), "{err}");
}

#[tokio::test]
async fn trailing_data_after_the_document_is_rejected() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(StaticTokenSource::bearer("t")));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/acme/repos");
			then.status(200).body("[{\"name\":\"x\"}] this is not json");
		})
		.await;

	let err = client.list_repositories("acme").await.expect_err("Trailing bytes should fail.");

	assert!(
		matches!(err, Error::Serialization(SerializationError::TrailingData { .. })),
		"{err}"
	);
}

#[tokio::test]
async fn refused_connections_are_retried_then_surfaced() {
	let port = {
		let listener = TcpListener::bind("127.0.0.1:0").expect("Ephemeral port should bind.");

		listener.local_addr().expect("Listener should have an address.").port()
	};
	let config = ClientConfig::builder(Arc::new(StaticTokenSource::bearer("t")))
		.base_url(Url::parse(&format!("http://127.0.0.1:{port}")).expect("URL should parse."))
		.retry_timeout(Duration::from_millis(500))
		.retry_backoff(Duration::from_millis(50), Duration::from_millis(100))
		.rate_limit_per_second(1_000)
		.build()
		.expect("Test configuration should be valid.");
	let client = GitHubClient::new(config).expect("Test client should build.");
	let started = Instant::now();
	let err = client.get_repo("acme", "widget").await.expect_err("Closed port should fail.");
	let elapsed = started.elapsed();

	assert!(
		matches!(err, Error::Transport(TransportError::Network { retryable: true, .. })),
		"{err}"
	);
	assert!(elapsed >= Duration::from_millis(400), "Gave up after {elapsed:?}.");
}
