//! TTL-bound "load or compute" cache over a [`CacheStore`].
//!
//! A [`TtlCache`] guards one cache slot. Per slot the state machine is:
//!
//! - **absent**, **stale** (`now - fetched_at >= ttl`), or **corrupt** (undecodable): compute,
//!   persist `{value, fetched_at: now}`, return the value; a failed compute leaves the store
//!   untouched.
//! - **fresh**: return the stored value without computing.
//!
//! A store read failure counts as a miss. Entries are never deleted, only overwritten. Loads
//! through one [`TtlCache`] (and its clones) are single-flight: while one caller recomputes, the
//! others wait and then reuse the freshly stored value. Separate processes sharing a directory
//! still race, and the last writer wins.

pub mod repositories;

pub use repositories::*;

// std
use std::marker::PhantomData;
// self
use crate::{
	_prelude::*,
	obs::{self, CacheOutcome},
	store::{CacheKey, CacheStore, StoreError},
};

/// Wall-clock source consulted for freshness checks and `fetched_at` stamps.
pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// Persisted envelope around a cached value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
	/// Cached value.
	pub value: T,
	/// Instant the value was computed.
	#[serde(with = "time::serde::rfc3339")]
	pub fetched_at: OffsetDateTime,
}
impl<T> CacheEntry<T> {
	/// Returns `true` while `now - fetched_at < ttl`.
	pub fn is_fresh(&self, now: OffsetDateTime, ttl: Duration) -> bool {
		now - self.fetched_at < ttl
	}
}

/// Failure modes of [`TtlCache::load`].
pub enum LoadError<T> {
	/// The compute function failed; nothing was written.
	Compute(Error),
	/// A value was computed but could not be persisted; the caller decides whether to use it.
	Persist {
		/// Freshly computed value.
		value: T,
		/// Slot that could not be written.
		key: CacheKey,
		/// Store failure.
		source: StoreError,
	},
}
impl<T> LoadError<T> {
	/// Returns the computed value carried by [`LoadError::Persist`].
	pub fn into_value(self) -> Option<T> {
		match self {
			Self::Compute(_) => None,
			Self::Persist { value, .. } => Some(value),
		}
	}
}
impl<T> Debug for LoadError<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Compute(e) => f.debug_tuple("Compute").field(e).finish(),
			Self::Persist { key, source, .. } => f
				.debug_struct("Persist")
				.field("key", key)
				.field("source", source)
				.finish_non_exhaustive(),
		}
	}
}
impl<T> Display for LoadError<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Compute(e) => write!(f, "Cache value could not be computed: {e}"),
			Self::Persist { key, source, .. } =>
				write!(f, "Cache entry `{key}` was computed but not persisted: {source}"),
		}
	}
}
impl<T> StdError for LoadError<T> {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		match self {
			Self::Compute(e) => Some(e),
			Self::Persist { source, .. } => Some(source),
		}
	}
}
impl<T> From<LoadError<T>> for Error {
	fn from(e: LoadError<T>) -> Self {
		match e {
			LoadError::Compute(e) => e,
			LoadError::Persist { source, .. } => Error::Storage(source),
		}
	}
}

/// Generic load-or-compute cache bound to one [`CacheKey`].
pub struct TtlCache<T> {
	store: Arc<dyn CacheStore>,
	name: String,
	key: CacheKey,
	ttl: Duration,
	clock: Clock,
	refresh_guard: Arc<AsyncMutex<()>>,
	_value: PhantomData<fn() -> T>,
}
impl<T> TtlCache<T>
where
	T: Serialize + DeserializeOwned,
{
	/// Default freshness window.
	pub const DEFAULT_TTL: Duration = Duration::hours(24);

	/// Creates a cache for the `<prefix>-<scope>` slot of `store`.
	pub fn new(store: Arc<dyn CacheStore>, prefix: &str, scope: &str) -> Self {
		Self {
			store,
			name: prefix.to_owned(),
			key: CacheKey::new(prefix, scope),
			ttl: Self::DEFAULT_TTL,
			clock: Arc::new(OffsetDateTime::now_utc),
			refresh_guard: Default::default(),
			_value: PhantomData,
		}
	}

	/// Overrides the freshness window.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;

		self
	}

	/// Replaces the wall clock, e.g. to simulate elapsed time in tests.
	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.clock = clock;

		self
	}

	/// Slot this cache reads and writes.
	pub fn key(&self) -> &CacheKey {
		&self.key
	}

	/// Freshness window.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Returns the fresh stored value, or runs `compute` and persists its result.
	pub async fn load<F, Fut>(&self, compute: F) -> Result<T, LoadError<T>>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let (outcome, detail) = match self.lookup().await {
			Lookup::Fresh(value) => return Ok(self.hit(value)),
			Lookup::Unusable(outcome, detail) => (outcome, detail),
		};
		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed the slot while this one waited.
		if let Lookup::Fresh(value) = self.lookup().await {
			return Ok(self.hit(value));
		}

		obs::log_cache_outcome(
			self.key.as_str(),
			outcome,
			detail.as_ref().map(|d| d as &dyn Display),
		);
		obs::record_cache_outcome(&self.name, outcome);

		let value = compute().await.map_err(LoadError::Compute)?;
		let entry = CacheEntry { value, fetched_at: (self.clock)() };
		let persisted = match serde_json::to_vec(&entry) {
			Ok(bytes) => self.store.put(&self.key, bytes).await,
			Err(e) => Err(StoreError::Serialization { message: e.to_string() }),
		};

		match persisted {
			Ok(()) => Ok(entry.value),
			Err(source) => {
				obs::log_persist_failure(self.key.as_str(), &source);

				Err(LoadError::Persist { value: entry.value, key: self.key.clone(), source })
			},
		}
	}

	async fn lookup(&self) -> Lookup<T> {
		let bytes = match self.store.get(&self.key).await {
			Ok(Some(bytes)) => bytes,
			Ok(None) => return Lookup::Unusable(CacheOutcome::Miss, None),
			Err(e) => return Lookup::Unusable(CacheOutcome::StoreError, Some(e.to_string())),
		};
		let entry = match serde_json::from_slice::<CacheEntry<T>>(&bytes) {
			Ok(entry) => entry,
			Err(e) => return Lookup::Unusable(CacheOutcome::Corrupt, Some(e.to_string())),
		};

		if entry.is_fresh((self.clock)(), self.ttl) {
			Lookup::Fresh(entry.value)
		} else {
			Lookup::Unusable(CacheOutcome::Stale, None)
		}
	}

	fn hit(&self, value: T) -> T {
		obs::log_cache_outcome(self.key.as_str(), CacheOutcome::Hit, None);
		obs::record_cache_outcome(&self.name, CacheOutcome::Hit);

		value
	}
}
impl<T> Clone for TtlCache<T> {
	fn clone(&self) -> Self {
		Self {
			store: self.store.clone(),
			name: self.name.clone(),
			key: self.key.clone(),
			ttl: self.ttl,
			clock: self.clock.clone(),
			refresh_guard: self.refresh_guard.clone(),
			_value: PhantomData,
		}
	}
}
impl<T> Debug for TtlCache<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TtlCache").field("key", &self.key).field("ttl", &self.ttl).finish()
	}
}

enum Lookup<T> {
	Fresh(T),
	Unusable(CacheOutcome, Option<String>),
}
