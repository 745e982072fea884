//! Test utilities and fixtures.
//!
//! This module provides shared testing infrastructure:
//! - [`RecordingRouter`]: an in-memory stack router that logs every command
//! - Response and interview fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use crate::error::RouterError;
use crate::model::{ResponseData, ResponseEntry, Screen};
use crate::router::Router;

/// One command received by a [`RecordingRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterCall {
    /// `push(screen)`, by screen id.
    Push(String),
    /// `skip(responses)`, by sorted response keys.
    Skip(Vec<String>),
    /// `checkpoint(name)`.
    Checkpoint(String),
    /// `restore(name)`.
    Restore(String),
    /// `milestone(name)`.
    Milestone(String),
    /// `next()`.
    Next,
    /// `complete()`.
    Complete,
}

/// Stack router that records the commands it receives.
///
/// The top of the stack is the last element of `stack`.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    /// Every command in arrival order, including rejected ones.
    pub calls: Vec<RouterCall>,
    /// Pending screen ids.
    pub stack: Vec<String>,
    /// Saved stacks by checkpoint name.
    pub checkpoints: HashMap<String, Vec<String>>,
    /// Answers merged by `skip`.
    pub responses: ResponseData,
    /// Milestones passed, in order.
    pub milestones: Vec<String>,
    /// Whether `complete` has been called.
    pub completed: bool,
}

impl RecordingRouter {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen that would be shown next.
    #[must_use]
    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }
}

impl Router for RecordingRouter {
    fn push(&mut self, screen: &Screen) -> Result<(), RouterError> {
        self.calls.push(RouterCall::Push(screen.id.clone()));
        self.stack.push(screen.id.clone());
        Ok(())
    }

    fn skip(&mut self, responses: &ResponseData) -> Result<(), RouterError> {
        let mut keys: Vec<String> = responses.keys().cloned().collect();
        keys.sort();
        self.calls.push(RouterCall::Skip(keys));
        self.stack.pop().ok_or(RouterError::StackUnderflow)?;
        self.responses
            .extend(responses.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn checkpoint(&mut self, name: &str) -> Result<(), RouterError> {
        self.calls.push(RouterCall::Checkpoint(name.to_string()));
        self.checkpoints.insert(name.to_string(), self.stack.clone());
        Ok(())
    }

    fn restore(&mut self, name: &str) -> Result<(), RouterError> {
        self.calls.push(RouterCall::Restore(name.to_string()));
        let saved = self
            .checkpoints
            .get(name)
            .ok_or_else(|| RouterError::UnknownCheckpoint {
                name: name.to_string(),
            })?;
        self.stack.clone_from(saved);
        Ok(())
    }

    fn milestone(&mut self, name: &str) -> Result<(), RouterError> {
        self.calls.push(RouterCall::Milestone(name.to_string()));
        self.milestones.push(name.to_string());
        Ok(())
    }

    fn next(&mut self) -> Result<(), RouterError> {
        self.calls.push(RouterCall::Next);
        Ok(())
    }

    fn complete(&mut self) -> Result<(), RouterError> {
        self.calls.push(RouterCall::Complete);
        self.completed = true;
        Ok(())
    }
}

/// Build plain-text responses from key/answer pairs.
#[must_use]
pub fn answers(pairs: &[(&str, &str)]) -> ResponseData {
    pairs
        .iter()
        .map(|(key, answer)| ((*key).to_string(), ResponseEntry::new(*answer)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_router_checkpoint_restore() {
        let mut router = RecordingRouter::new();
        router.push(&Screen::new("a", "")).unwrap();
        router.checkpoint("cp").unwrap();
        router.push(&Screen::new("b", "")).unwrap();
        router.restore("cp").unwrap();
        assert_eq!(router.stack, vec!["a".to_string()]);
    }

    #[test]
    fn test_recording_router_skip_requires_screen() {
        let mut router = RecordingRouter::new();
        assert_eq!(
            router.skip(&answers(&[("k", "v")])),
            Err(RouterError::StackUnderflow)
        );
    }

    #[test]
    fn test_recording_router_tracks_milestones_and_completion() {
        let mut router = RecordingRouter::new();
        router.milestone("half").unwrap();
        router.complete().unwrap();
        router.next().unwrap();
        assert_eq!(router.milestones, vec!["half".to_string()]);
        assert!(router.completed);
        assert_eq!(
            router.calls,
            vec![
                RouterCall::Milestone("half".into()),
                RouterCall::Complete,
                RouterCall::Next
            ]
        );
    }
}
