//! Actions cache commands.

pub mod delete;
pub mod display;
pub mod errors;
pub mod list;

use anyhow::Result;
use clap::Subcommand;

use crate::factory::Factory;

pub use errors::CacheError;

/// Work with GitHub Actions caches.
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Lists the actions cache for a repository
    List(list::ListArgs),
    /// Delete cache by key
    Delete(delete::DeleteArgs),
}

impl CacheCommand {
    /// Run the selected subcommand.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        match self {
            Self::List(args) => args.run(factory).await,
            Self::Delete(args) => args.run(factory).await,
        }
    }
}
