//! Interview data model.
//!
//! This module defines:
//! - [`Interview`] and [`Screen`]: the read-only interview definition
//! - [`ResponseData`]: answers accumulated during a run
//! - [`ConditionalAction`]: a guard condition plus the action it triggers
//! - [`ConditionGroup`] and [`IfClause`]: recursive AND/OR condition trees
//!
//! All types deserialize from the camelCase JSON the persistence layer
//! produces, and derive [`schemars::JsonSchema`].

mod action;
mod condition;
mod interview;
mod operator;
mod response;

pub use action::{
    ActionConfig, ActionType, ConditionalAction, SerializedActionConfig, SingleCondition,
    PUSH_ACTION_DELIMITER,
};
pub use condition::{generate_node_id, Condition, ConditionGroup, ElseClause, GroupKind, IfClause};
pub use interview::{Interview, Screen};
pub use operator::{ConditionalOperator, OperatorGroup};
pub use response::{Answer, EntryRef, ResponseData, ResponseEntry};
