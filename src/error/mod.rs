//! Error types for the branching interpreter.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level error for hosts embedding the interpreter
//! - [`ScriptError`]: Failures while evaluating or dispatching during a turn
//! - [`RouterError`]: Failures raised by the navigation engine
//! - [`ValidationError`]: Authoring-time problems in interview definitions
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync`.

use thiserror::Error;

/// Top-level application error.
///
/// Wraps all subsystem errors for hosts that want a single error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Script execution error.
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Router error raised outside a script turn.
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Interview definition failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while a script processes a screen.
///
/// Any of these aborts the current `process` call. None are retried: the
/// interview run is broken until the underlying data is corrected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A date operator received a value that is neither a date nor `"null"`.
    #[error("The date '{value}' failed to parse")]
    InvalidDateFormat {
        /// The offending value.
        value: String,
    },

    /// An operator outside the evaluator's table.
    #[error("Unhandled conditional operator: {operator}")]
    UnhandledOperator {
        /// The operator as it was received.
        operator: String,
    },

    /// A screen id that does not resolve in the interview's screen table.
    #[error("Screen not found: {screen_id}")]
    MissingScreenReference {
        /// The unresolved screen id.
        screen_id: String,
    },

    /// Error surfaced by the router while executing a dispatched command.
    #[error("Router rejected command: {0}")]
    Router(#[from] RouterError),
}

/// Errors a [`Router`](crate::router::Router) may raise.
///
/// The interpreter never catches these; they propagate to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Restore was requested for a checkpoint that was never set.
    #[error("Unknown checkpoint: {name}")]
    UnknownCheckpoint {
        /// The checkpoint name.
        name: String,
    },

    /// The navigation stack had nothing left to pop.
    #[error("Navigation stack underflow")]
    StackUnderflow,

    /// A command arrived after the interview was completed.
    #[error("Interview already complete")]
    InterviewComplete,

    /// Any other router-specific failure.
    #[error("{message}")]
    Other {
        /// Description of the failure.
        message: String,
    },
}

/// Authoring-time validation errors.
///
/// Reported by the `validate` methods on the model; never raised implicitly
/// while an interview runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A condition that compares a response does not name one.
    #[error("A '{operator}' condition must select a response to compare to")]
    MissingResponseKey {
        /// Display name of the operator.
        operator: String,
    },

    /// A condition whose operator needs an operand has none.
    #[error("A '{operator}' condition must have a value")]
    MissingValue {
        /// Display name of the operator.
        operator: String,
    },

    /// A push action with nothing to push.
    #[error("A Push action cannot have an empty payload")]
    EmptyPushPayload,

    /// `always_execute` used anywhere but the first condition of a clause.
    #[error("Only the top-level condition should be configurable to always execute")]
    NestedAlwaysExecute,

    /// `always_execute` first condition followed by more conditions.
    #[error("If the first condition is always executable then there should be no other conditions")]
    AlwaysExecuteNotAlone,

    /// A reference to a screen that is not part of the interview.
    #[error("Screen '{screen_id}' referenced by {referenced_by} does not exist")]
    UnknownScreen {
        /// The unresolved screen id.
        screen_id: String,
        /// Where the reference was found.
        referenced_by: String,
    },

    /// An action payload could not be decoded from its wire form.
    #[error("Invalid payload for '{action_type}' action: {reason}")]
    InvalidPayload {
        /// The action type being decoded.
        action_type: String,
        /// Why decoding failed.
        reason: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
