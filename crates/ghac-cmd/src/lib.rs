//! Command implementations for the gh-actions-cache extension.

pub mod cache;
pub mod factory;

#[cfg(test)]
pub mod test_helpers;
