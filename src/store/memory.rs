//! Thread-safe in-memory [`CacheStore`] implementation for tests and ephemeral caches.

// self
use crate::{
	_prelude::*,
	store::{CacheKey, CacheStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<CacheKey, Vec<u8>>>>;

/// Storage backend that keeps blobs in-process; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of occupied slots.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no slot is occupied.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl CacheStore for MemoryStore {
	fn get<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, Option<Vec<u8>>> {
		Box::pin(async move { Ok(self.0.read().get(key).cloned()) })
	}

	fn put<'a>(&'a self, key: &'a CacheKey, bytes: Vec<u8>) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.0.write().insert(key.clone(), bytes);

			Ok(())
		})
	}
}
