//! GitHub Actions workflow runs.

// self
use crate::{_prelude::*, types::User};

/// GitHub Actions workflow run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowRun {
	/// Run identifier.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub id: u64,
	/// Workflow display name.
	pub name: Option<String>,
	/// Sequential run number within the workflow.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub run_number: u64,
	/// Attempt counter for re-runs.
	pub run_attempt: Option<u64>,
	/// Triggering event (`push`, `pull_request`, ...).
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub event: String,
	/// Lifecycle status.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub status: RunStatus,
	/// Final result; unset until the run completes.
	pub conclusion: Option<RunConclusion>,
	/// Owning workflow identifier.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub workflow_id: u64,
	/// Branch the run executed on.
	pub head_branch: Option<String>,
	/// Commit the run executed on.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub head_sha: String,
	/// Browser URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub html_url: String,
	/// Account that triggered the run.
	pub actor: Option<User>,
	/// Creation timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}

/// Workflow run status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
	/// Waiting for a runner.
	Queued,
	/// Executing.
	InProgress,
	/// Finished; see the conclusion.
	Completed,
	/// Waiting on an environment approval.
	Waiting,
	/// Requested but not yet queued.
	Requested,
	/// Pending concurrency slot.
	Pending,
	/// Status added upstream after this crate was written.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Workflow run conclusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunConclusion {
	/// All jobs passed.
	Success,
	/// At least one job failed.
	Failure,
	/// Run was cancelled.
	Cancelled,
	/// Run was skipped.
	Skipped,
	/// Run exceeded its time limit.
	TimedOut,
	/// Run needs manual action.
	ActionRequired,
	/// Neutral result.
	Neutral,
	/// Run went stale.
	Stale,
	/// Run failed to start.
	StartupFailure,
	/// Conclusion added upstream after this crate was written.
	#[serde(other)]
	Unknown,
}

/// Wrapper returned by `GET /repos/{org}/{repo}/actions/workflows/{workflow}.yml/runs`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WorkflowRunsPage {
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub(crate) workflow_runs: Vec<WorkflowRun>,
}
