//! Git remote discovery and base repository resolution.

pub mod client;
pub mod errors;
pub mod remote;

pub use client::GitClient;
pub use errors::GitError;
pub use remote::{Remote, resolve_base_repo};
