// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::GitHubClient,
	types::{Comparison, RepositoryCommit},
};

impl GitHubClient {
	/// Returns the commits reachable from `head` but not from `base`.
	pub async fn compare_commits(
		&self,
		org: &str,
		repo: &str,
		base: &str,
		head: &str,
	) -> Result<Vec<RepositoryCommit>> {
		let comparison: Comparison = self
			.pipeline
			.execute_json(
				self.context("compare_commits"),
				Method::GET,
				&format!("/repos/{org}/{repo}/compare/{base}...{head}"),
				None::<&()>,
			)
			.await?;

		Ok(comparison.commits)
	}
}
