//! Interview Branching
//!
//! A conditional branching interpreter for stack-routed interviews. After
//! each screen is answered it decides which screens come next, which
//! checkpoints to set and restore, and when the interview is complete.
//!
//! # Features
//!
//! - 13 conditional operators (equality, ordering, emptiness, dates)
//! - Seven router commands (push, skip, checkpoint, restore, milestone,
//!   end interview, do nothing)
//! - Recursive AND/OR condition trees with if/else chains
//! - Authoring validation and JSON schema for every model type
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   process(screen, responses)   ┌──────────────────┐
//! │   Router    │───────────────────────────────▶│ BranchingScript  │
//! │   (host)    │◀───────────────────────────────│                  │
//! └─────────────┘  push / skip / checkpoint /    └───────┬──────────┘
//!                  restore / milestone /                 │
//!                  complete / next            ┌──────────┴──────────┐
//!                                             ▼                     ▼
//!                                     ConditionEvaluator       dispatch()
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod router;
pub mod script;
pub mod telemetry;

#[cfg(test)]
mod test_utils;
