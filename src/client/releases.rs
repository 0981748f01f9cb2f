// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::GitHubClient,
	types::{CreateReleaseRequest, Release, Releases},
};

impl GitHubClient {
	/// Lists the most recent page of releases for `org/repo`.
	pub async fn list_releases(&self, org: &str, repo: &str) -> Result<Releases> {
		self.pipeline
			.execute_json(
				self.context("list_releases"),
				Method::GET,
				&format!("/repos/{org}/{repo}/releases"),
				None::<&()>,
			)
			.await
	}

	/// Creates a release; each call performs one remote mutation.
	pub async fn create_release(
		&self,
		org: &str,
		repo: &str,
		request: &CreateReleaseRequest,
	) -> Result<Release> {
		self.pipeline
			.execute_json(
				self.context("create_release"),
				Method::POST,
				&format!("/repos/{org}/{repo}/releases"),
				Some(request),
			)
			.await
	}
}
