//! Plain data shapes mirroring GitHub REST payloads.
//!
//! Response records are lenient: a field GitHub omits or sends as `null` takes its default value
//! (`None` for optional fields), so a schema change upstream never breaks decoding. Request
//! payloads skip unset optional fields.

pub mod commit;
pub mod pull_request;
pub mod release;
pub mod repo;
pub mod workflow;

pub use commit::*;
pub use pull_request::*;
pub use release::*;
pub use repo::*;
pub use workflow::*;

// self
use crate::_prelude::*;

/// GitHub account reference embedded in most records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
	/// Numeric account identifier.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub id: u64,
	/// Account login.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub login: String,
	/// Profile URL.
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub html_url: String,
	/// `User`, `Organization`, or `Bot`.
	#[serde(rename = "type")]
	#[serde(deserialize_with = "crate::types::null_as_default")]
	pub account_type: String,
}

/// Decodes `null` as the field type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
