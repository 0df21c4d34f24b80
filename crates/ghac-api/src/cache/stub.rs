//! In-memory [`CacheService`] returning queued responses.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::CacheService;
use super::model::{CacheEntry, CacheListPage, CacheUsage, DeleteResponse};
use super::query::CacheQuery;
use crate::errors::ApiError;

type Queue<T> = Mutex<VecDeque<Result<T, ApiError>>>;

/// Stub cache service for tests.
///
/// Each operation pops the next queued response; an empty queue yields a
/// 500 error. Every query received is recorded.
#[derive(Debug, Default)]
pub struct StubCacheService {
    usage: Queue<CacheUsage>,
    list: Queue<CacheListPage>,
    delete: Queue<DeleteResponse>,
    list_queries: Mutex<Vec<CacheQuery>>,
    delete_queries: Mutex<Vec<CacheQuery>>,
}

impl StubCacheService {
    /// Stub with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a usage response.
    pub fn push_usage(&self, response: Result<CacheUsage, ApiError>) {
        lock(&self.usage).push_back(response);
    }

    /// Queue a list response.
    pub fn push_list(&self, response: Result<CacheListPage, ApiError>) {
        lock(&self.list).push_back(response);
    }

    /// Queue a delete response.
    pub fn push_delete(&self, response: Result<DeleteResponse, ApiError>) {
        lock(&self.delete).push_back(response);
    }

    /// Queries passed to `list_caches`, in call order.
    pub fn list_queries(&self) -> Vec<CacheQuery> {
        lock(&self.list_queries).clone()
    }

    /// Queries passed to `delete_caches`, in call order.
    pub fn delete_queries(&self) -> Vec<CacheQuery> {
        lock(&self.delete_queries).clone()
    }
}

impl CacheService for StubCacheService {
    async fn usage(&self) -> Result<CacheUsage, ApiError> {
        next(&self.usage, "usage")
    }

    async fn list_caches(&self, query: &CacheQuery) -> Result<CacheListPage, ApiError> {
        lock(&self.list_queries).push(query.clone());
        next(&self.list, "list")
    }

    async fn delete_caches(&self, query: &CacheQuery) -> Result<DeleteResponse, ApiError> {
        lock(&self.delete_queries).push(query.key_scope());
        next(&self.delete, "delete")
    }
}

/// Cache entry on `refs/heads/main` with fixed timestamps and size.
pub fn entry(id: u64, key: &str) -> CacheEntry {
    CacheEntry {
        id,
        git_ref: "refs/heads/main".to_string(),
        key: key.to_string(),
        version: format!("version-{id}"),
        last_accessed_at: "2022-06-29T13:33:49Z".to_string(),
        created_at: "2022-06-29T13:33:49Z".to_string(),
        size_in_bytes: 1024,
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next<T>(queue: &Queue<T>, operation: &str) -> Result<T, ApiError> {
    lock(queue).pop_front().unwrap_or_else(|| {
        Err(ApiError::Http {
            status: 500,
            message: format!("no stubbed {operation} response"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_pop_responses_in_order() {
        let stub = StubCacheService::new();
        stub.push_delete(Ok(DeleteResponse {
            total_count: 2,
            actions_caches: vec![entry(1, "a"), entry(2, "a")],
        }));

        let query = CacheQuery::new().with_key(Some("a")).with_per_page(100);
        assert_eq!(stub.delete_caches(&query).await.unwrap().total_count, 2);
        assert_eq!(stub.delete_caches(&query).await.unwrap_err().status(), Some(500));
        assert_eq!(stub.delete_queries()[0], query.key_scope());
    }

    #[tokio::test]
    async fn test_should_fail_when_nothing_queued() {
        let stub = StubCacheService::new();
        let err = stub.usage().await.unwrap_err();
        assert_eq!(err.message(), Some("no stubbed usage response"));
    }
}
