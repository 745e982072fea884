//! Shared helpers for integration tests.
//!
//! Provides a stack router that records what it is told and a driver that
//! runs an interview to completion with canned answers.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use interview_branching::error::{RouterError, ScriptError};
use interview_branching::model::{Interview, ResponseData, ResponseEntry, Screen};
use interview_branching::router::Router;
use interview_branching::script::{BranchingScript, Script};

/// Commands seen by [`StackRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Push(String),
    Skip,
    Checkpoint(String),
    Restore(String),
    Milestone(String),
    Next,
    Complete,
}

/// In-memory LIFO router.
#[derive(Debug, Default)]
pub struct StackRouter {
    pub calls: Vec<Call>,
    pub stack: Vec<String>,
    pub checkpoints: HashMap<String, Vec<String>>,
    pub responses: ResponseData,
    pub milestones: Vec<String>,
    pub completed: bool,
}

impl StackRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen ids in visitation order (top of stack first).
    pub fn pending(&self) -> Vec<&str> {
        self.stack.iter().rev().map(String::as_str).collect()
    }

    pub fn pushes(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Push(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Router for StackRouter {
    fn push(&mut self, screen: &Screen) -> Result<(), RouterError> {
        self.calls.push(Call::Push(screen.id.clone()));
        self.stack.push(screen.id.clone());
        Ok(())
    }

    fn skip(&mut self, responses: &ResponseData) -> Result<(), RouterError> {
        self.calls.push(Call::Skip);
        self.stack.pop().ok_or(RouterError::StackUnderflow)?;
        for (key, entry) in responses {
            self.responses.insert(key.clone(), entry.clone());
        }
        Ok(())
    }

    fn checkpoint(&mut self, name: &str) -> Result<(), RouterError> {
        self.calls.push(Call::Checkpoint(name.to_string()));
        self.checkpoints.insert(name.to_string(), self.stack.clone());
        Ok(())
    }

    fn restore(&mut self, name: &str) -> Result<(), RouterError> {
        self.calls.push(Call::Restore(name.to_string()));
        let saved = self
            .checkpoints
            .get(name)
            .cloned()
            .ok_or_else(|| RouterError::UnknownCheckpoint {
                name: name.to_string(),
            })?;
        self.stack = saved;
        Ok(())
    }

    fn milestone(&mut self, name: &str) -> Result<(), RouterError> {
        self.calls.push(Call::Milestone(name.to_string()));
        self.milestones.push(name.to_string());
        Ok(())
    }

    fn next(&mut self) -> Result<(), RouterError> {
        self.calls.push(Call::Next);
        Ok(())
    }

    fn complete(&mut self) -> Result<(), RouterError> {
        self.calls.push(Call::Complete);
        self.completed = true;
        Ok(())
    }
}

/// Build plain-text responses from key/answer pairs.
pub fn answers(pairs: &[(&str, &str)]) -> ResponseData {
    pairs
        .iter()
        .map(|(key, answer)| ((*key).to_string(), ResponseEntry::new(*answer)))
        .collect()
}

/// Run an interview until the stack empties or it completes.
///
/// Each visited screen merges its canned answers into the response store
/// before being processed. Returns the visited screen ids in order.
pub fn run_interview(
    script: &BranchingScript<'_>,
    router: &mut StackRouter,
    answers_by_screen: &HashMap<&str, ResponseData>,
) -> Result<Vec<String>, ScriptError> {
    script.setup(router)?;

    let mut visited = Vec::new();
    while !router.completed {
        let Some(id) = router.stack.pop() else {
            break;
        };
        let screen = script.screen(&id).expect("pushed screens resolve");
        if let Some(given) = answers_by_screen.get(id.as_str()) {
            router
                .responses
                .extend(given.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        script.prepare(&*router, screen, &router.responses)?;
        let responses = router.responses.clone();
        script.process(router, screen, &responses)?;
        visited.push(id);
    }
    Ok(visited)
}

/// Load an interview from a JSON literal.
pub fn interview_from_json(value: serde_json::Value) -> Interview {
    serde_json::from_value(value).expect("valid interview JSON")
}
