//! Wire shapes of the Actions cache endpoints.

use serde::{Deserialize, Serialize};

/// A single cache entry stored for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Opaque numeric identifier.
    pub id: u64,
    /// Git ref the entry is scoped to, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Key chosen when the cache was saved. Case-sensitive in storage.
    pub key: String,
    /// Opaque version hash.
    #[serde(default)]
    pub version: String,
    /// ISO-8601 timestamp of the last restore.
    #[serde(default)]
    pub last_accessed_at: String,
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Stored size.
    #[serde(default)]
    pub size_in_bytes: u64,
}

/// One page of `GET /repos/{owner}/{repo}/actions/caches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheListPage {
    /// Number of entries matching the filter across all pages.
    pub total_count: u64,
    /// Entries on this page.
    #[serde(default)]
    pub actions_caches: Vec<CacheEntry>,
}

/// Response of `GET /repos/{owner}/{repo}/actions/cache/usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheUsage {
    /// `OWNER/REPO`.
    #[serde(default)]
    pub full_name: String,
    /// Combined size of all active caches.
    pub active_caches_size_in_bytes: u64,
    /// Number of active caches.
    #[serde(default)]
    pub active_caches_count: u64,
}

/// Response of `DELETE /repos/{owner}/{repo}/actions/caches?key=...`.
pub type DeleteResponse = CacheListPage;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_should_deserialize_list_page() {
        let body = r#"{
            "total_count": 1,
            "actions_caches": [{
                "id": 505,
                "ref": "refs/heads/main",
                "key": "Linux-node-958aff96db2d75d67787d1e634ae70b659de937b",
                "version": "73885106f58cc52a7df9ec4d4a5622a5614813162cb516c759a30af6bf56e6f0",
                "last_accessed_at": "2019-01-24T22:45:36.000Z",
                "created_at": "2019-01-24T22:45:36.000Z",
                "size_in_bytes": 1024
            }]
        }"#;
        let page: CacheListPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_count, 1);
        let entry = &page.actions_caches[0];
        assert_eq!(entry.id, 505);
        assert_eq!(entry.git_ref, "refs/heads/main");
        assert_eq!(entry.size_in_bytes, 1024);
    }

    #[test]
    fn test_should_default_missing_optional_fields() {
        let body = r#"{"id": 1, "ref": "refs/heads/dev", "key": "k"}"#;
        let entry: CacheEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.version, "");
        assert_eq!(entry.last_accessed_at, "");
        assert_eq!(entry.size_in_bytes, 0);

        let empty: CacheListPage = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();
        assert!(empty.actions_caches.is_empty());
    }

    #[test]
    fn test_should_deserialize_usage() {
        let body = r#"{"full_name": "octo/app", "active_caches_size_in_bytes": 3072, "active_caches_count": 3}"#;
        let usage: CacheUsage = serde_json::from_str(body).unwrap();
        assert_eq!(
            usage,
            CacheUsage {
                full_name: "octo/app".into(),
                active_caches_size_in_bytes: 3072,
                active_caches_count: 3,
            }
        );
    }
}
