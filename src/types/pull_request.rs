//! Pull request records plus the list, create, and update payloads.

// self
use crate::{_prelude::*, types::User};

/// GitHub pull request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
	/// Pull request identifier.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub id: u64,
	/// Repository-scoped number.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub number: u64,
	/// `open` or `closed`.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub state: String,
	/// Title.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub title: String,
	/// Markdown description.
	pub body: Option<String>,
	/// Whether the pull request is a draft.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub draft: bool,
	/// Whether the pull request was merged.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub merged: bool,
	/// Browser URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub html_url: String,
	/// Author.
	pub user: Option<User>,
	/// Source branch.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub head: PullRequestBranch,
	/// Target branch.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub base: PullRequestBranch,
	/// Creation timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
	/// Merge timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub merged_at: Option<OffsetDateTime>,
}

/// Branch reference on either side of a pull request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestBranch {
	/// `owner:branch` label.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub label: String,
	/// Branch name.
	#[serde(rename = "ref")]
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub ref_name: String,
	/// Tip commit SHA.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub sha: String,
}

/// Pull request state filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
	/// Open pull requests.
	Open,
	/// Closed pull requests.
	Closed,
	/// Both open and closed.
	All,
}

/// Query options for `GET /repos/{org}/{repo}/pulls`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestListOptions {
	/// State filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<PullRequestState>,
	/// `user:branch` head filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub head: Option<String>,
	/// Base branch filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base: Option<String>,
	/// `created`, `updated`, `popularity`, or `long-running`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sort: Option<String>,
	/// `asc` or `desc`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub direction: Option<String>,
	/// Page size of the single page returned.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub per_page: Option<u32>,
}

/// Payload for `POST /repos/{org}/{repo}/pulls`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPullRequest {
	/// Title.
	pub title: String,
	/// Branch (or `user:branch`) holding the changes.
	pub head: String,
	/// Branch the changes are merged into.
	pub base: String,
	/// Markdown description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// Open as draft.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub draft: Option<bool>,
	/// Allow maintainers to push to the head branch.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub maintainer_can_modify: Option<bool>,
}
impl NewPullRequest {
	/// Creates a payload merging `head` into `base`.
	pub fn new(title: impl Into<String>, head: impl Into<String>, base: impl Into<String>) -> Self {
		Self { title: title.into(), head: head.into(), base: base.into(), ..Default::default() }
	}

	/// Sets the description.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Payload for `PATCH /repos/{org}/{repo}/pulls/{number}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestUpdate {
	/// New title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// New description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// `open` or `closed`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// New base branch.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base: Option<String>,
	/// Allow maintainers to push to the head branch.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub maintainer_can_modify: Option<bool>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn list_options_only_carry_set_filters() {
		let options = PullRequestListOptions {
			state: Some(PullRequestState::All),
			head: Some("acme:feature".into()),
			..Default::default()
		};

		assert_eq!(
			serde_json::to_value(&options).expect("Options should encode."),
			serde_json::json!({ "state": "all", "head": "acme:feature" })
		);
	}

	#[test]
	fn pull_request_branch_uses_ref_field() {
		let pr: PullRequest = serde_json::from_str(
			r#"{"number":42,"head":{"ref":"feature","sha":"abc"},"base":{"ref":"main"}}"#,
		)
		.expect("Pull request fixture should decode.");

		assert_eq!(pr.number, 42);
		assert_eq!(pr.head.ref_name, "feature");
		assert_eq!(pr.base.ref_name, "main");
		assert!(pr.merged_at.is_none());
	}
}
