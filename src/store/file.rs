//! Directory-backed [`CacheStore`] writing one JSON file per cache key.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{CacheKey, CacheStore, StoreError, StoreFuture},
};

/// Persists each cache slot as `<dir>/<key>.json`, replacing files atomically.
#[derive(Clone, Debug)]
pub struct FileStore {
	dir: PathBuf,
}
impl FileStore {
	/// Opens (or creates) a store rooted at `dir`.
	pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let dir = dir.into();

		Self::ensure_dir_exists(&dir)?;

		Ok(Self { dir })
	}

	/// Root directory of the store.
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// File backing `key`.
	pub fn path_for(&self, key: &CacheKey) -> PathBuf {
		self.dir.join(format!("{key}.json"))
	}

	fn ensure_dir_exists(dir: &Path) -> Result<(), StoreError> {
		fs::create_dir_all(dir).map_err(|e| StoreError::Backend {
			message: format!("Failed to create cache directory {}: {e}", dir.display()),
		})
	}

	fn read_now(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, StoreError> {
		let path = self.path_for(key);

		match fs::read(&path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to read {}: {e}", path.display()),
			}),
		}
	}

	fn write_now(&self, key: &CacheKey, bytes: &[u8]) -> Result<(), StoreError> {
		Self::ensure_dir_exists(&self.dir)?;

		let path = self.path_for(key);
		// One temp file per writer.
		let tmp_path = self.dir.join(format!("{key}.{:016x}.tmp", rand::random::<u64>()));

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(bytes).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &path).map_err(|e| {
			let _ = fs::remove_file(&tmp_path);

			StoreError::Backend { message: format!("Failed to replace {}: {e}", path.display()) }
		})
	}
}
impl CacheStore for FileStore {
	fn get<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, Option<Vec<u8>>> {
		Box::pin(async move { self.read_now(key) })
	}

	fn put<'a>(&'a self, key: &'a CacheKey, bytes: Vec<u8>) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.write_now(key, &bytes) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::env;
	// self
	use super::*;

	fn temp_dir(label: &str) -> PathBuf {
		env::temp_dir().join(format!("octoclient-{label}-{:016x}", rand::random::<u64>()))
	}

	#[tokio::test]
	async fn missing_key_reads_as_none() {
		let dir = temp_dir("file-missing");
		let store = FileStore::open(&dir).expect("Store should open.");

		assert!(
			store
				.get(&CacheKey::new("repositories", "acme"))
				.await
				.expect("Read should succeed.")
				.is_none()
		);

		let _ = fs::remove_dir_all(dir);
	}

	#[tokio::test]
	async fn put_replaces_previous_blob_without_leftovers() {
		let dir = temp_dir("file-put");
		let store = FileStore::open(&dir).expect("Store should open.");
		let key = CacheKey::new("repositories", "acme");

		store.put(&key, b"first".to_vec()).await.expect("First write should succeed.");
		store.put(&key, b"second".to_vec()).await.expect("Second write should succeed.");

		assert_eq!(
			store.get(&key).await.expect("Read should succeed.").as_deref(),
			Some(&b"second"[..])
		);
		assert!(store.path_for(&key).ends_with("repositories-acme.json"));

		let files = fs::read_dir(&dir).expect("Directory should be readable.").count();

		assert_eq!(files, 1);

		let _ = fs::remove_dir_all(dir);
	}

	#[tokio::test]
	async fn unreadable_slot_reports_backend_error() {
		let dir = temp_dir("file-unreadable");
		let store = FileStore::open(&dir).expect("Store should open.");
		let key = CacheKey::new("repositories", "acme");

		// A directory in place of the file makes the read fail with something other than NotFound.
		fs::create_dir_all(store.path_for(&key)).expect("Blocking directory should be created.");

		assert!(matches!(store.get(&key).await, Err(StoreError::Backend { .. })));

		let _ = fs::remove_dir_all(dir);
	}
}
