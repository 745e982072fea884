//! The navigation engine the script drives.
//!
//! The host supplies the [`Router`]. It owns the pending-screen stack, the
//! named checkpoints, the response store and completion signalling. The
//! script only issues commands through this trait.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`, so unit
//! tests get a `MockRouter` for call-sequence assertions.

use crate::error::RouterError;
use crate::model::{ResponseData, Screen};

/// Stack-based navigation engine.
///
/// Every command may fail with a [`RouterError`]. The script passes those
/// errors through unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait Router {
    /// Place a screen on top of the navigation stack.
    ///
    /// The stack is LIFO: the last screen pushed is the next one shown.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if the router cannot accept the screen.
    fn push(&mut self, screen: &Screen) -> Result<(), RouterError>;

    /// Bypass the next screen, merging `responses` into the response store
    /// as if it had been answered.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::StackUnderflow`] when there is no screen to skip.
    fn skip(&mut self, responses: &ResponseData) -> Result<(), RouterError>;

    /// Snapshot the navigation stack under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if the snapshot cannot be stored.
    fn checkpoint(&mut self, name: &str) -> Result<(), RouterError>;

    /// Replace the navigation stack with the snapshot saved under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownCheckpoint`] when `name` was never
    /// checkpointed.
    fn restore(&mut self, name: &str) -> Result<(), RouterError>;

    /// Record that milestone `name` has been passed.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if the milestone cannot be recorded.
    fn milestone(&mut self, name: &str) -> Result<(), RouterError>;

    /// Advance past the screen just processed.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if the router cannot advance.
    fn next(&mut self) -> Result<(), RouterError>;

    /// Signal that the interview is finished.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if completion cannot be signalled.
    fn complete(&mut self) -> Result<(), RouterError>;
}
