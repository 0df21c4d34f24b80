//! `gh-actions-cache delete` command.
//!
//! Deleting by key goes through listing, confirmation and deletion:
//!
//! 1. every page of entries whose key matches is fetched and reduced to
//!    exact (case-insensitive) key matches;
//! 2. with no match the command reports it and stops successfully;
//! 3. unless `--confirm` is given, the matches are shown and the user must
//!    pick "Delete";
//! 4. one key-scoped delete is sent per distinct stored key.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::debug;

use ghac_api::cache::query::MAX_PER_PAGE;
use ghac_api::cache::{
    CacheEntry, CacheQuery, CacheService, RestCacheService, filter_exact, list_all,
};
use ghac_core::cmdutil::CancelError;
use ghac_core::ios_println;
use ghac_core::iostreams::IOStreams;
use ghac_core::prompter::Prompter;
use ghac_core::text::pluralize;

use super::display;
use super::errors::CacheError;
use crate::factory::Factory;

/// Validation message when confirmation is needed but cannot be asked for.
pub const CONFIRM_REQUIRED_MESSAGE: &str = "--confirm required when not running interactively";

const CONFIRM_PROMPT: &str = "Are you sure you want to delete the cache entries?";

/// Delete caches by key.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// cache key which needs to be deleted
    #[arg(value_name = "KEY")]
    key: String,

    /// Select another repository for finding actions cache.
    #[arg(short = 'R', long, env = "GH_REPO", value_name = "[HOST/]OWNER/REPO")]
    repo: Option<String>,

    /// Filter by branch
    #[arg(short = 'B', long)]
    branch: Option<String>,

    /// Confirm deletion without prompting
    #[arg(long)]
    confirm: bool,
}

/// How the user agrees to a deletion.
#[derive(Debug, Clone, Copy)]
enum Confirmation<'a> {
    /// `--confirm` was given.
    Given,
    /// Ask with this prompter.
    Ask(&'a dyn Prompter),
    /// No terminal to ask on.
    Unavailable,
}

impl DeleteArgs {
    /// Run the delete command.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let repo = factory.resolve_repo(self.repo.as_deref()).await?;
        let client = factory.api_client(repo.host(), "delete")?;
        let service = RestCacheService::new(client, repo);
        let prompter = factory.prompter();

        let confirmation = if self.confirm {
            Confirmation::Given
        } else if factory.can_prompt() {
            Confirmation::Ask(prompter.as_ref())
        } else {
            Confirmation::Unavailable
        };
        self.delete(&factory.io, &service, confirmation, Utc::now())
            .await
    }

    async fn delete<S: CacheService>(
        &self,
        ios: &IOStreams,
        service: &S,
        confirmation: Confirmation<'_>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let query = CacheQuery::new()
            .with_branch(self.branch.as_deref())
            .with_key(Some(self.key.as_str()))
            .with_per_page(MAX_PER_PAGE);

        let entries = list_all(service, &query).await.map_err(CacheError::from_api)?;
        let matches = filter_exact(entries, &self.key);
        debug!(key = %self.key, matches = matches.len(), "listed caches for deletion");
        if matches.is_empty() {
            self.print_no_match(ios);
            return Ok(());
        }

        match confirmation {
            Confirmation::Given => {}
            Confirmation::Unavailable => {
                return Err(CacheError::Validation(CONFIRM_REQUIRED_MESSAGE.to_string()).into());
            }
            Confirmation::Ask(prompter) => {
                ios_println!(
                    ios,
                    "You're going to delete {}",
                    pluralize(count(matches.len()), "cache entry", "cache entries")
                );
                ios_println!(ios);
                display::print_trimmed_cache_list(ios, &matches, now);

                let options = vec!["Delete".to_string(), "Cancel".to_string()];
                if prompter.select(CONFIRM_PROMPT, None, &options)? != 0 {
                    debug!("deletion cancelled");
                    return Err(CancelError.into());
                }
            }
        }

        let deleted = delete_matches(service, &query, &matches).await?;
        if deleted == 0 {
            self.print_no_match(ios);
            return Ok(());
        }

        let cs = ios.color_scheme();
        ios_println!(
            ios,
            "{} Deleted {} with key '{}'",
            cs.success_icon(),
            pluralize(
                i64::try_from(deleted).unwrap_or(i64::MAX),
                "cache entry",
                "cache entries"
            ),
            self.key
        );
        Ok(())
    }

    fn print_no_match(&self, ios: &IOStreams) {
        ios_println!(ios, "Cache with input key '{}' does not exist", self.key);
    }
}

/// Delete each distinct stored key among `matches`, returning how many
/// entries the API removed.
async fn delete_matches<S: CacheService>(
    service: &S,
    query: &CacheQuery,
    matches: &[CacheEntry],
) -> Result<u64, CacheError> {
    let mut keys: Vec<&str> = Vec::new();
    for entry in matches {
        if !keys.contains(&entry.key.as_str()) {
            keys.push(&entry.key);
        }
    }

    let mut deleted = 0;
    for key in keys {
        let scoped = query.clone().with_key(Some(key));
        match service.delete_caches(&scoped).await {
            Ok(response) => deleted += response.total_count,
            Err(e) if e.is_not_found() => debug!(key, "nothing left to delete"),
            Err(e) => return Err(CacheError::from_api(e)),
        }
    }
    Ok(deleted)
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
