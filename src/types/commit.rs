//! Commits returned by the compare endpoint.

// self
use crate::{_prelude::*, types::User};

/// Commit entry returned by the compare endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryCommit {
	/// Commit SHA.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub sha: String,
	/// Browser URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub html_url: String,
	/// Git-level commit data.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub commit: CommitDetails,
	/// GitHub account matched to the author email, if any.
	pub author: Option<User>,
	/// GitHub account matched to the committer email, if any.
	pub committer: Option<User>,
}

/// Git-level commit data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitDetails {
	/// Full commit message.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub message: String,
	/// Author signature.
	pub author: Option<Signature>,
	/// Committer signature.
	pub committer: Option<Signature>,
}

/// Git signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
	/// Signer name.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub name: String,
	/// Signer email.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub email: String,
	/// Signature timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub date: Option<OffsetDateTime>,
}

/// Comparison document; only its commits are exposed.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Comparison {
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub(crate) commits: Vec<RepositoryCommit>,
}
