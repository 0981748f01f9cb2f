//! Repository listing cache scoped to one organization.

// self
use crate::{
	_prelude::*,
	cache::{Clock, LoadError, TtlCache},
	client::GitHubClient,
	store::CacheStore,
	types::Repositories,
};

/// Caches `GET /users/{org}/repos` for 24 hours under the `repositories-<org>` slot.
#[derive(Clone, Debug)]
pub struct RepositoryCache {
	cache: TtlCache<Repositories>,
	client: GitHubClient,
	org: String,
}
impl RepositoryCache {
	/// Cache slot prefix.
	pub const PREFIX: &'static str = "repositories";
	/// Freshness window for repository listings.
	pub const TTL: Duration = Duration::hours(24);

	/// Creates a cache for `org` backed by `store`.
	pub fn new(client: GitHubClient, org: impl Into<String>, store: Arc<dyn CacheStore>) -> Self {
		let org = org.into();
		let cache = TtlCache::new(store, Self::PREFIX, &org).with_ttl(Self::TTL);

		Self { cache, client, org }
	}

	/// Replaces the wall clock used for freshness checks.
	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.cache = self.cache.with_clock(clock);

		self
	}

	/// Organization this cache is scoped to.
	pub fn org(&self) -> &str {
		&self.org
	}

	/// Underlying TTL cache.
	pub fn cache(&self) -> &TtlCache<Repositories> {
		&self.cache
	}

	/// Returns the cached listing while fresh, otherwise fetches and persists a new one.
	pub async fn load(&self) -> Result<Repositories, LoadError<Repositories>> {
		self.cache.load(|| self.client.list_repositories(&self.org)).await
	}
}
