//! `gh-actions-cache list` command.
//!
//! Lists the Actions caches of a repository, optionally filtered by branch
//! and key.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::debug;

use ghac_api::cache::query::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use ghac_api::cache::{CacheQuery, CacheService, RestCacheService, SortDirection, SortField};
use ghac_core::Repo;
use ghac_core::ios_println;
use ghac_core::iostreams::IOStreams;
use ghac_core::text;

use super::display;
use super::errors::CacheError;
use crate::factory::Factory;

/// List caches of a repository.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Select another repository for finding actions cache.
    #[arg(short = 'R', long, env = "GH_REPO", value_name = "[HOST/]OWNER/REPO")]
    repo: Option<String>,

    /// Filter by branch
    #[arg(short = 'B', long)]
    branch: Option<String>,

    /// Maximum number of items to fetch (default is 30, max limit is 100)
    #[arg(short = 'L', long, default_value_t = i64::from(DEFAULT_PER_PAGE), allow_negative_numbers = true)]
    limit: i64,

    /// Filter by key
    #[arg(long)]
    key: Option<String>,

    /// Order of caches returned (asc/desc)
    #[arg(long)]
    order: Option<String>,

    /// Sort fetched caches (last-used/size/created-at)
    #[arg(long)]
    sort: Option<String>,
}

/// Flag values after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Validated {
    limit: u32,
    sort: Option<SortField>,
    direction: Option<SortDirection>,
}

impl ListArgs {
    fn validate(&self) -> Result<Validated, CacheError> {
        let limit = u32::try_from(self.limit)
            .ok()
            .filter(|l| (1..=MAX_PER_PAGE).contains(l))
            .ok_or_else(|| {
                CacheError::Validation(format!(
                    "{} is not a valid value for limit flag. Allowed values: 1-100",
                    self.limit
                ))
            })?;

        let direction = match non_empty(self.order.as_deref()) {
            None => None,
            Some(order) => Some(SortDirection::from_flag(order).ok_or_else(|| {
                CacheError::Validation(format!(
                    "{order} is not a valid value for order flag. Allowed values: asc/desc"
                ))
            })?),
        };

        let sort = match non_empty(self.sort.as_deref()) {
            None => None,
            Some(sort) => Some(SortField::from_flag(sort).ok_or_else(|| {
                CacheError::Validation(format!(
                    "{sort} is not a valid value for sort flag. Allowed values: last-used/size/created-at"
                ))
            })?),
        };

        Ok(Validated {
            limit,
            sort,
            direction,
        })
    }

    /// Run the list command.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let flags = self.validate()?;
        let repo = factory.resolve_repo(self.repo.as_deref()).await?;
        let client = factory.api_client(repo.host(), "list")?;
        let service = RestCacheService::new(client, repo.clone());
        self.list(&factory.io, &service, &repo, flags, Utc::now())
            .await?;
        Ok(())
    }

    async fn list<S: CacheService>(
        &self,
        ios: &IOStreams,
        service: &S,
        repo: &Repo,
        flags: Validated,
        now: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let branch = non_empty(self.branch.as_deref());
        let key = non_empty(self.key.as_deref());

        if branch.is_none() && key.is_none() {
            match service.usage().await {
                Ok(usage) => {
                    ios_println!(
                        ios,
                        "Total caches size {}",
                        text::format_cache_size(usage.active_caches_size_in_bytes)
                    );
                    ios_println!(ios);
                }
                Err(e) => debug!(error = %e, "cache usage unavailable"),
            }
        }

        let query = CacheQuery::new()
            .with_branch(branch)
            .with_key(key)
            .with_per_page(flags.limit)
            .with_sort(flags.sort)
            .with_direction(flags.direction);
        let page = service.list_caches(&query).await?;

        let shown = page.actions_caches.len().min(flags.limit as usize);
        ios_println!(
            ios,
            "Showing {shown} of {} cache entries in {}",
            page.total_count,
            repo.full_name()
        );
        ios_println!(ios);
        display::print_cache_list(ios, &page.actions_caches[..shown], now);
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
