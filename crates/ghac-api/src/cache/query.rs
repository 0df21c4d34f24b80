//! Query-string construction for the cache listing and delete endpoints.
//!
//! Parameters are emitted in a fixed order (`ref`, `key`, `per_page`,
//! `sort`, `direction`, `page`) and values equal to the server defaults are
//! left out.

use std::fmt;

/// Page size the server applies when `per_page` is absent.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page size the server accepts.
pub const MAX_PER_PAGE: u32 = 100;

const REFS_PREFIX: &str = "refs/";

/// Field the listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// `created-at` on the command line.
    CreatedAt,
    /// `last-used` on the command line.
    LastUsed,
    /// `size` on the command line.
    Size,
}

impl SortField {
    /// Values accepted by [`SortField::from_flag`].
    pub const FLAG_VALUES: [&'static str; 3] = ["last-used", "size", "created-at"];

    /// Parse a command-line value.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "created-at" => Some(Self::CreatedAt),
            "last-used" => Some(Self::LastUsed),
            "size" => Some(Self::Size),
            _ => None,
        }
    }

    /// Value of the `sort` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::LastUsed => "last_accessed_at",
            Self::Size => "size_in_bytes",
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Values accepted by [`SortDirection::from_flag`].
    pub const FLAG_VALUES: [&'static str; 2] = ["asc", "desc"];

    /// Parse a command-line value.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Value of the `direction` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Expand a branch name to a full ref.
///
/// Values already under `refs/` pass through unchanged.
pub fn git_ref_for_branch(branch: &str) -> String {
    if branch.starts_with(REFS_PREFIX) {
        branch.to_string()
    } else {
        format!("refs/heads/{branch}")
    }
}

/// Filter, ordering and pagination options for one cache request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheQuery {
    git_ref: Option<String>,
    key: Option<String>,
    per_page: u32,
    sort: Option<SortField>,
    direction: Option<SortDirection>,
    page: u64,
}

impl Default for CacheQuery {
    fn default() -> Self {
        Self {
            git_ref: None,
            key: None,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            direction: None,
            page: 1,
        }
    }
}

impl CacheQuery {
    /// Query with server defaults and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a branch. Empty values clear the filter.
    #[must_use]
    pub fn with_branch(mut self, branch: Option<&str>) -> Self {
        self.git_ref = non_empty(branch).map(git_ref_for_branch);
        self
    }

    /// Filter by key. Empty values clear the filter.
    #[must_use]
    pub fn with_key(mut self, key: Option<&str>) -> Self {
        self.key = non_empty(key).map(str::to_string);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the sort field.
    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortField>) -> Self {
        self.sort = sort;
        self
    }

    /// Set the sort direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Option<SortDirection>) -> Self {
        self.direction = direction;
        self
    }

    /// Select a 1-based page.
    #[must_use]
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Copy carrying only the `key` and `ref` filters, as used by deletes.
    #[must_use]
    pub fn key_scope(&self) -> Self {
        Self {
            git_ref: self.git_ref.clone(),
            key: self.key.clone(),
            ..Self::default()
        }
    }

    /// Full ref filter, if any.
    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    /// Key filter, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Ordered parameters, omitting anything left at its default.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref git_ref) = self.git_ref {
            pairs.push(("ref", git_ref.clone()));
        }
        if let Some(ref key) = self.key {
            pairs.push(("key", key.clone()));
        }
        if self.per_page != DEFAULT_PER_PAGE {
            pairs.push(("per_page", self.per_page.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_query_value().to_string()));
        }
        if let Some(direction) = self.direction {
            pairs.push(("direction", direction.as_query_value().to_string()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.to_pairs().iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={}", urlencoding::encode(value))?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
