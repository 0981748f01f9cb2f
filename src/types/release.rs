//! Releases, their assets, and the release creation payload.

// self
use crate::{_prelude::*, types::User};

/// Release listing returned by `GET /repos/{org}/{repo}/releases`.
pub type Releases = Vec<Release>;

/// GitHub release.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
	/// Release identifier.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub id: u64,
	/// Tag the release points at.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub tag_name: String,
	/// Branch or commit the tag is created from.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub target_commitish: String,
	/// Release title.
	pub name: Option<String>,
	/// Markdown release notes.
	pub body: Option<String>,
	/// Whether the release is an unpublished draft.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub draft: bool,
	/// Whether the release is marked as a prerelease.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub prerelease: bool,
	/// Browser URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub html_url: String,
	/// Release author.
	pub author: Option<User>,
	/// Creation timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Publication timestamp; unset for drafts.
	#[serde(with = "time::serde::rfc3339::option")]
	pub published_at: Option<OffsetDateTime>,
	/// Uploaded assets.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub assets: Vec<ReleaseAsset>,
}

/// Binary attached to a release.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseAsset {
	/// Asset identifier.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub id: u64,
	/// File name.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub name: String,
	/// MIME type.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub content_type: String,
	/// Size in bytes.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub size: u64,
	/// Direct download URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub browser_download_url: String,
}

/// Payload for `POST /repos/{org}/{repo}/releases`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReleaseRequest {
	/// Tag to create or reuse.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tag_name: Option<String>,
	/// Release title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Markdown release notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// Create as draft.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub draft: Option<bool>,
	/// Mark as prerelease.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub prerelease: Option<bool>,
	/// Ask GitHub to generate the notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub generate_release_notes: Option<bool>,
	/// Discussion category to open alongside the release.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discussion_category_name: Option<String>,
}
impl CreateReleaseRequest {
	/// Starts a request for `tag_name`.
	pub fn new(tag_name: impl Into<String>) -> Self {
		Self { tag_name: Some(tag_name.into()), ..Default::default() }
	}

	/// Sets the release title.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the release notes.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Marks the release as a draft.
	pub fn draft(mut self) -> Self {
		self.draft = Some(true);

		self
	}

	/// Marks the release as a prerelease.
	pub fn prerelease(mut self) -> Self {
		self.prerelease = Some(true);

		self
	}

	/// Asks GitHub to generate release notes.
	pub fn generate_release_notes(mut self) -> Self {
		self.generate_release_notes = Some(true);

		self
	}
}
