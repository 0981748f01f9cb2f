mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::{CountingTokenSource, build_test_client};
use octoclient::{
	error::Error,
	types::{
		CreateReleaseRequest, NewPullRequest, PullRequestListOptions, PullRequestState,
		PullRequestUpdate, RunConclusion, RunStatus,
	},
};

#[tokio::test]
async fn list_repositories_decodes_listing() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/acme/repos");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"name\":\"x\",\"stargazers_count\":5}]");
		})
		.await;
	let repos = client.list_repositories("acme").await.expect("Listing should succeed.");

	mock.assert_async().await;

	assert_eq!(repos.len(), 1);
	assert_eq!(repos[0].name, "x");
	assert_eq!(repos[0].stars, 5);
}

#[tokio::test]
async fn create_release_returns_echoed_release() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/repos/acme/widget/releases")
				.header("content-type", "application/json")
				.body("{\"tag_name\":\"v1.0\"}");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"tag_name\":\"v1.0\",\"id\":1}");
		})
		.await;
	let release = client
		.create_release("acme", "widget", &CreateReleaseRequest::new("v1.0"))
		.await
		.expect("Release creation should succeed.");

	mock.assert_async().await;

	assert_eq!(release.tag_name, "v1.0");
	assert_eq!(release.id, 1);
}

#[tokio::test]
async fn get_repo_surfaces_forbidden_as_api_error() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"message\":\"Resource not accessible by integration\"}");
		})
		.await;
	let err = client.get_repo("acme", "widget").await.expect_err("403 should fail.");

	mock.assert_calls_async(1).await;

	assert_eq!(err.status(), Some(403));

	let Error::Api(api) = err else { panic!("Expected an API error.") };

	assert_eq!(api.message.as_deref(), Some("Resource not accessible by integration"));
	assert!(api.url.ends_with("/repos/acme/widget"));
}

#[tokio::test]
async fn list_releases_reads_single_page() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget/releases");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":2,\"tag_name\":\"v2.0\",\"draft\":true},{\"id\":1,\"tag_name\":\"v1.0\"}]");
		})
		.await;
	let releases = client.list_releases("acme", "widget").await.expect("Listing should succeed.");

	mock.assert_async().await;

	assert_eq!(releases.len(), 2);
	assert!(releases[0].draft);
	assert_eq!(releases[1].tag_name, "v1.0");
}

#[tokio::test]
async fn list_runs_unwraps_workflow_runs() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget/actions/workflows/ci.yml/runs");
			then.status(200).header("content-type", "application/json").body(concat!(
				"{\"total_count\":1,\"workflow_runs\":",
				"[{\"id\":9,\"status\":\"completed\",\"conclusion\":\"failure\"}]}",
			));
		})
		.await;
	let runs = client.list_runs("acme", "widget", "ci").await.expect("Runs should load.");

	mock.assert_async().await;

	assert_eq!(runs.len(), 1);
	assert_eq!(runs[0].id, 9);
	assert_eq!(runs[0].status, RunStatus::Completed);
	assert_eq!(runs[0].conclusion, Some(RunConclusion::Failure));
}

#[tokio::test]
async fn compare_commits_returns_only_commits() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget/compare/v1.0...main");
			then.status(200).header("content-type", "application/json").body(concat!(
				"{\"status\":\"ahead\",\"ahead_by\":1,",
				"\"commits\":[{\"sha\":\"abc\",\"commit\":{\"message\":\"Fix it\"}}]}",
			));
		})
		.await;
	let commits =
		client.compare_commits("acme", "widget", "v1.0", "main").await.expect("Compare should work.");

	mock.assert_async().await;

	assert_eq!(commits.len(), 1);
	assert_eq!(commits[0].sha, "abc");
	assert_eq!(commits[0].commit.message, "Fix it");
}

#[tokio::test]
async fn pull_request_operations_use_expected_verbs() {
	let server = MockServer::start_async().await;
	let client = build_test_client(&server, Arc::new(CountingTokenSource::default()));
	let pr = concat!(
		"{\"number\":7,\"title\":\"Add widget\",\"state\":\"open\",",
		"\"head\":{\"ref\":\"feature\"},\"base\":{\"ref\":\"main\"}}",
	);
	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/repos/acme/widget/pulls")
				.query_param("state", "all")
				.query_param("base", "main");
			then.status(200).header("content-type", "application/json").body(format!("[{pr}]"));
		})
		.await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/repos/acme/widget/pulls");
			then.status(201).header("content-type", "application/json").body(pr);
		})
		.await;
	let edit = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/repos/acme/widget/pulls/7")
				.body("{\"state\":\"closed\"}");
			then.status(200).header("content-type", "application/json").body(pr);
		})
		.await;
	let get = server
		.mock_async(|when, then| {
			when.method(GET).path("/repos/acme/widget/pulls/7");
			then.status(200).header("content-type", "application/json").body(pr);
		})
		.await;
	let options = PullRequestListOptions {
		state: Some(PullRequestState::All),
		base: Some("main".into()),
		..Default::default()
	};
	let listed =
		client.list_pull_requests("acme", "widget", &options).await.expect("List should work.");
	let created = client
		.create_pull_request("acme", "widget", &NewPullRequest::new("Add widget", "feature", "main"))
		.await
		.expect("Create should work.");

	client
		.edit_pull_request(
			"acme",
			"widget",
			7,
			&PullRequestUpdate { state: Some("closed".into()), ..Default::default() },
		)
		.await
		.expect("Edit should work.");

	let fetched = client.get_pull_request("acme", "widget", 7).await.expect("Get should work.");

	list.assert_async().await;
	create.assert_async().await;
	edit.assert_async().await;
	get.assert_async().await;

	assert_eq!(listed.len(), 1);
	assert_eq!(created.number, 7);
	assert_eq!(fetched.head.ref_name, "feature");
}
