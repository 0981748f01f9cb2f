// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::GitHubClient,
	types::{NewPullRequest, PullRequest, PullRequestListOptions, PullRequestUpdate},
};

impl GitHubClient {
	/// Lists one page of pull requests filtered by `options` (sent as query parameters).
	pub async fn list_pull_requests(
		&self,
		org: &str,
		repo: &str,
		options: &PullRequestListOptions,
	) -> Result<Vec<PullRequest>> {
		self.pipeline
			.execute_json(
				self.context("list_pull_requests"),
				Method::GET,
				&format!("/repos/{org}/{repo}/pulls"),
				Some(options),
			)
			.await
	}

	/// Opens a pull request; each call performs one remote mutation.
	pub async fn create_pull_request(
		&self,
		org: &str,
		repo: &str,
		pull_request: &NewPullRequest,
	) -> Result<PullRequest> {
		self.pipeline
			.execute_json(
				self.context("create_pull_request"),
				Method::POST,
				&format!("/repos/{org}/{repo}/pulls"),
				Some(pull_request),
			)
			.await
	}

	/// Applies `update` to pull request `number`, discarding the response body.
	pub async fn edit_pull_request(
		&self,
		org: &str,
		repo: &str,
		number: u64,
		update: &PullRequestUpdate,
	) -> Result<()> {
		self.pipeline
			.execute_empty(
				self.context("edit_pull_request"),
				Method::PATCH,
				&format!("/repos/{org}/{repo}/pulls/{number}"),
				Some(update),
			)
			.await
	}

	/// Fetches pull request `number`.
	pub async fn get_pull_request(
		&self,
		org: &str,
		repo: &str,
		number: u64,
	) -> Result<PullRequest> {
		self.pipeline
			.execute_json(
				self.context("get_pull_request"),
				Method::GET,
				&format!("/repos/{org}/{repo}/pulls/{number}"),
				None::<&()>,
			)
			.await
	}
}
