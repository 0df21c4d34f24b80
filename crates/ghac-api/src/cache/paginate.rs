//! Page aggregation and exact-key filtering.

use tracing::debug;

use super::CacheService;
use super::model::CacheEntry;
use super::query::CacheQuery;
use crate::errors::ApiError;

/// Fetch every page matching `query` and concatenate the entries.
///
/// Page 1 is requested first; its `total_count` determines how many more
/// pages follow. Requests are sequential and the first failure aborts the
/// whole aggregation.
pub async fn list_all<S: CacheService>(
    service: &S,
    query: &CacheQuery,
) -> Result<Vec<CacheEntry>, ApiError> {
    let per_page = u64::from(query.per_page().max(1));

    let first = service.list_caches(&query.clone().with_page(1)).await?;
    let pages = first.total_count.div_ceil(per_page);
    debug!(total = first.total_count, pages, "aggregating cache pages");

    let mut entries = first.actions_caches;
    for page in 2..=pages {
        let next = service.list_caches(&query.clone().with_page(page)).await?;
        entries.extend(next.actions_caches);
    }
    Ok(entries)
}

/// Keep entries whose key equals `key` under Unicode case folding. Order is
/// preserved.
pub fn filter_exact(entries: Vec<CacheEntry>, key: &str) -> Vec<CacheEntry> {
    entries
        .into_iter()
        .filter(|entry| unicase::eq(entry.key.as_str(), key))
        .collect()
}
