//! Repository records.

// self
use crate::_prelude::*;

/// Repository listing returned by `GET /users/{org}/repos`.
pub type Repositories = Vec<Repo>;

/// GitHub repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
	/// Repository name without the owner.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub name: String,
	/// Free-form description.
	pub description: Option<String>,
	/// Primary language detected by GitHub.
	pub language: Option<String>,
	/// Default branch name.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub default_branch: String,
	/// Stargazer count.
	#[serde(rename = "stargazers_count")]
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub stars: u64,
	/// Whether the repository is a fork.
	#[serde(rename = "fork")]
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub is_fork: bool,
	/// Whether the repository is archived.
	#[serde(rename = "archived")]
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub is_archived: bool,
	/// Repository topics.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub topics: Vec<String>,
	/// Browser URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub html_url: String,
	/// HTTPS clone URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub clone_url: String,
	/// SSH clone URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub ssh_url: String,
	/// Detected license, if any.
	pub license: Option<License>,
}

/// License summary attached to a repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
	/// Human-readable license name.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub name: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn repo_decodes_github_field_names() {
		let repos: Repositories = serde_json::from_str(
			r#"[{
				"name": "widget",
				"description": null,
				"language": "Rust",
				"stargazers_count": 5,
				"fork": true,
				"archived": false,
				"topics": ["cli"],
				"license": null,
				"owner": { "login": "acme" }
			}]"#,
		)
		.expect("Repository fixture should decode.");

		assert_eq!(repos.len(), 1);
		assert_eq!(repos[0].name, "widget");
		assert_eq!(repos[0].stars, 5);
		assert!(repos[0].is_fork);
		assert_eq!(repos[0].language.as_deref(), Some("Rust"));
		assert!(repos[0].license.is_none());
		assert!(repos[0].default_branch.is_empty());
	}
}
