//! Durable keyed blob stores backing the TTL cache.
//!
//! Stores only move opaque bytes; freshness and encoding belong to
//! [`TtlCache`](crate::cache::TtlCache).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

/// Boxed future returned by [`CacheStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Keyed get/put of serialized cache entries.
pub trait CacheStore
where
	Self: Send + Sync,
{
	/// Reads the blob stored under `key`, if any.
	fn get<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, Option<Vec<u8>>>;

	/// Stores `bytes` under `key`, replacing any previous blob.
	fn put<'a>(&'a self, key: &'a CacheKey, bytes: Vec<u8>) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`CacheStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Stable cache slot name of the form `<prefix>-<scope>`.
///
/// Characters that are unsafe in file names are replaced with `_`, so one scope always maps to
/// exactly one slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(String);
impl CacheKey {
	/// Builds the key for `prefix` within `scope` (e.g. `repositories` for organization `acme`).
	pub fn new(prefix: &str, scope: &str) -> Self {
		Self(sanitize(&format!("{prefix}-{scope}")))
	}

	/// Key as a string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn sanitize(name: &str) -> String {
	name.chars()
		.map(|c| match c {
			'/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
			c if c.is_control() => '_',
			c => c,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "disk unreachable".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("disk unreachable"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn cache_key_joins_prefix_and_scope() {
		assert_eq!(CacheKey::new("repositories", "acme").as_str(), "repositories-acme");
		assert_eq!(CacheKey::new("repositories", "acme/../etc").as_str(), "repositories-acme_.._etc");
		assert_eq!(CacheKey::new("runs", "a:b").to_string(), "runs-a_b");
	}
}
