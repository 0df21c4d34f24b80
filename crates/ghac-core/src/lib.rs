//! Core types, traits, and utilities for the gh-actions-cache extension.
//!
//! This crate provides the foundational abstractions used across all ghac crates:
//! - [`IOStreams`] for terminal I/O handling
//! - [`Config`](config::Config) trait for configuration and token lookup
//! - [`Prompter`](prompter::Prompter) trait for interactive prompts
//! - [`Repo`] for `[HOST/]OWNER/REPO` references
//! - Text utilities and table formatting

pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod instance;
pub mod iostreams;
pub mod keyring_store;
pub mod prompter;
pub mod repo;
pub mod table;
#[cfg(test)]
pub mod test_utils;
pub mod text;

pub use errors::ConfigError;
pub use iostreams::IOStreams;
pub use repo::Repo;
