// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::GitHubClient,
	types::{WorkflowRun, WorkflowRunsPage},
};

impl GitHubClient {
	/// Lists the most recent page of runs for the `{workflow}.yml` workflow file.
	pub async fn list_runs(
		&self,
		org: &str,
		repo: &str,
		workflow: &str,
	) -> Result<Vec<WorkflowRun>> {
		let page: WorkflowRunsPage = self
			.pipeline
			.execute_json(
				self.context("list_runs"),
				Method::GET,
				&format!("/repos/{org}/{repo}/actions/workflows/{workflow}.yml/runs"),
				None::<&()>,
			)
			.await?;

		Ok(page.workflow_runs)
	}
}
