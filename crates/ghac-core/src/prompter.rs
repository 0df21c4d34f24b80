//! Interactive prompt handling.

use std::sync::{Mutex, PoisonError};

use anyhow::Result;

use crate::cmdutil::CancelError;

/// Trait for interactive terminal prompts.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Present a list of options and return the selected index.
    ///
    /// Returns [`CancelError`] when the user aborts the prompt.
    fn select(&self, prompt: &str, default: Option<usize>, options: &[String]) -> Result<usize>;
}

/// Dialoguer-based prompter implementation.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    /// Create a new prompter.
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, default: Option<usize>, options: &[String]) -> Result<usize> {
        let mut sel = dialoguer::Select::new().with_prompt(prompt).items(options);
        if let Some(d) = default {
            sel = sel.default(d);
        }
        sel.interact_opt()?.ok_or_else(|| CancelError.into())
    }
}

/// Stub prompter for testing that returns pre-configured answers.
#[derive(Debug, Default)]
pub struct StubPrompter {
    /// Pre-configured select answers (index), consumed front to back.
    pub select_answers: Mutex<Vec<usize>>,
    /// Every prompt message shown, in order.
    pub prompts: Mutex<Vec<String>>,
}

impl StubPrompter {
    /// Queue a select answer.
    pub fn push_select(&self, index: usize) {
        self.select_answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(index);
    }

    /// Prompt messages shown so far.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Prompter for StubPrompter {
    fn select(&self, prompt: &str, default: Option<usize>, _options: &[String]) -> Result<usize> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        let mut answers = self
            .select_answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if answers.is_empty() {
            Ok(default.unwrap_or(0))
        } else {
            Ok(answers.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Delete".into(), "Cancel".into()]
    }

    #[test]
    fn test_should_return_default_select_when_empty() {
        let stub = StubPrompter::default();
        assert_eq!(stub.select("pick one", Some(1), &options()).unwrap(), 1);
        assert_eq!(stub.select("pick one", None, &options()).unwrap(), 0);
    }

    #[test]
    fn test_should_consume_queued_answers_in_order() {
        let stub = StubPrompter::default();
        stub.push_select(1);
        stub.push_select(0);
        assert_eq!(stub.select("first", None, &options()).unwrap(), 1);
        assert_eq!(stub.select("second", None, &options()).unwrap(), 0);
        assert_eq!(stub.seen_prompts(), vec!["first", "second"]);
    }
}
