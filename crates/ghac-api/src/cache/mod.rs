//! GitHub Actions cache endpoints.
//!
//! [`CacheService`] is the seam commands talk to. [`RestCacheService`] backs
//! it with the REST API; [`StubCacheService`](stub::StubCacheService) serves
//! canned responses in tests.

pub mod model;
pub mod paginate;
pub mod query;
pub mod stub;

use tracing::debug;

use ghac_core::Repo;

use crate::client::Client;
use crate::errors::ApiError;

pub use model::{CacheEntry, CacheListPage, CacheUsage, DeleteResponse};
pub use paginate::{filter_exact, list_all};
pub use query::{CacheQuery, SortDirection, SortField};

/// Remote operations on a repository's Actions caches.
#[allow(async_fn_in_trait)]
pub trait CacheService {
    /// Total size and count of active caches.
    async fn usage(&self) -> Result<CacheUsage, ApiError>;

    /// Fetch one page of cache entries.
    async fn list_caches(&self, query: &CacheQuery) -> Result<CacheListPage, ApiError>;

    /// Delete every entry matching the query's key (and ref, when set).
    ///
    /// Only the `key` and `ref` filters are sent.
    async fn delete_caches(&self, query: &CacheQuery) -> Result<DeleteResponse, ApiError>;
}

/// [`CacheService`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct RestCacheService {
    client: Client,
    repo: Repo,
}

impl RestCacheService {
    /// Service for `repo` using `client`.
    pub fn new(client: Client, repo: Repo) -> Self {
        Self { client, repo }
    }

    /// Repository this service operates on.
    pub fn repo(&self) -> &Repo {
        &self.repo
    }

    fn caches_path(&self, query: &CacheQuery) -> String {
        let base = format!("{}/actions/caches", self.repo_path());
        let encoded = query.encode();
        if encoded.is_empty() {
            base
        } else {
            format!("{base}?{encoded}")
        }
    }

    fn repo_path(&self) -> String {
        format!(
            "repos/{}/{}",
            urlencoding::encode(self.repo.owner()),
            urlencoding::encode(self.repo.name()),
        )
    }
}

impl CacheService for RestCacheService {
    async fn usage(&self) -> Result<CacheUsage, ApiError> {
        let path = format!("{}/actions/cache/usage", self.repo_path());
        self.client.rest(reqwest::Method::GET, &path).await
    }

    async fn list_caches(&self, query: &CacheQuery) -> Result<CacheListPage, ApiError> {
        let page: CacheListPage = self
            .client
            .rest(reqwest::Method::GET, &self.caches_path(query))
            .await?;
        debug!(
            page = query.page(),
            returned = page.actions_caches.len(),
            total = page.total_count,
            "listed caches"
        );
        Ok(page)
    }

    async fn delete_caches(&self, query: &CacheQuery) -> Result<DeleteResponse, ApiError> {
        let path = self.caches_path(&query.key_scope());
        self.client.rest(reqwest::Method::DELETE, &path).await
    }
}
