// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::GitHubClient,
	types::{Repo, Repositories},
};

impl GitHubClient {
	/// Fetches `org/name`.
	pub async fn get_repo(&self, org: &str, name: &str) -> Result<Repo> {
		self.pipeline
			.execute_json(
				self.context("get_repo"),
				Method::GET,
				&format!("/repos/{org}/{name}"),
				None::<&()>,
			)
			.await
	}

	/// Lists the first page of repositories owned by the `org` user or organization.
	pub async fn list_repositories(&self, org: &str) -> Result<Repositories> {
		self.pipeline
			.execute_json(
				self.context("list_repositories"),
				Method::GET,
				&format!("/users/{org}/repos"),
				None::<&()>,
			)
			.await
	}
}
