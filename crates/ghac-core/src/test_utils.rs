//! Shared test utilities for ghac-core.
//!
//! This module is only compiled in test builds (`#[cfg(test)]`).

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes every test that touches the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Scoped environment overrides.
///
/// Holds a process-wide lock for its lifetime so concurrently running tests
/// never observe each other's variables, and restores every touched variable
/// when dropped.
#[derive(Debug)]
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Acquire the environment lock without changing anything yet.
    pub fn new() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Set `key` to `value` until the guard is dropped.
    #[must_use]
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.remember(key);
        // SAFETY: ENV_LOCK is held, so no other test reads or writes the environment.
        unsafe { std::env::set_var(key, value) };
        self
    }

    /// Remove `key` until the guard is dropped.
    #[must_use]
    pub fn unset(mut self, key: &str) -> Self {
        self.remember(key);
        // SAFETY: ENV_LOCK is held, so no other test reads or writes the environment.
        unsafe { std::env::remove_var(key) };
        self
    }

    fn remember(&mut self, key: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in self.saved.drain(..).rev() {
            match original {
                // SAFETY: ENV_LOCK is still held until `_lock` drops after this body.
                Some(val) => unsafe { std::env::set_var(&key, val) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}
