//! REST client and the GitHub Actions cache service.

pub mod cache;
pub mod client;
pub mod errors;
pub mod http;

pub use client::Client;
pub use errors::ApiError;
