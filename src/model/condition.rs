//! Recursive condition trees and if/else clauses.
//!
//! A [`ConditionGroup`] combines single conditions and nested groups with
//! AND/OR; an [`IfClause`] picks an action from a chain of groups. Leaves are
//! the same [`SingleCondition`] the flat [`ConditionalAction`] uses, so both
//! shapes share one operator implementation.
//!
//! [`ConditionalAction`]: super::ConditionalAction

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ActionConfig, ConditionalOperator, SingleCondition};
use crate::error::ValidationError;

/// Generate a unique id for a tree node.
#[must_use]
pub fn generate_node_id() -> String {
    format!("node_{}", uuid::Uuid::new_v4())
}

/// How a group combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Every child must hold.
    #[default]
    And,
    /// At least one child must hold.
    Or,
}

/// A node in a condition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Condition {
    /// Nested group.
    Group(ConditionGroup),
    /// Leaf comparison.
    Single(SingleCondition),
}

impl From<SingleCondition> for Condition {
    fn from(value: SingleCondition) -> Self {
        Self::Single(value)
    }
}

impl From<ConditionGroup> for Condition {
    fn from(value: ConditionGroup) -> Self {
        Self::Group(value)
    }
}

/// AND/OR combination of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionGroup {
    /// Node id.
    #[serde(default = "generate_node_id")]
    pub id: String,
    /// Combinator.
    #[serde(rename = "type")]
    pub kind: GroupKind,
    /// Children, evaluated in order.
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    /// Create a group of the given kind.
    #[must_use]
    pub fn new(kind: GroupKind, conditions: Vec<Condition>) -> Self {
        Self {
            id: generate_node_id(),
            kind,
            conditions,
        }
    }

    /// AND of the given conditions.
    #[must_use]
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::new(GroupKind::And, conditions)
    }

    /// OR of the given conditions.
    #[must_use]
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::new(GroupKind::Or, conditions)
    }

    /// Every leaf in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&SingleCondition> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(group: &'a ConditionGroup, out: &mut Vec<&'a SingleCondition>) {
    for condition in &group.conditions {
        match condition {
            Condition::Single(single) => out.push(single),
            Condition::Group(nested) => collect_leaves(nested, out),
        }
    }
}

/// What happens when an if-clause's condition fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ElseClause {
    /// Try another clause.
    If(Box<IfClause>),
    /// Run this action.
    Action(ActionConfig),
}

/// `if conditionGroup { action } else { elseClause }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IfClause {
    /// Node id.
    #[serde(default = "generate_node_id")]
    pub id: String,
    /// Guard.
    pub condition_group: ConditionGroup,
    /// Action when the guard holds.
    pub action: ActionConfig,
    /// Fallback when it does not.
    pub else_clause: ElseClause,
}

impl IfClause {
    /// Create a clause with a do-nothing else branch.
    #[must_use]
    pub fn new(condition_group: ConditionGroup, action: ActionConfig) -> Self {
        Self {
            id: generate_node_id(),
            condition_group,
            action,
            else_clause: ElseClause::Action(ActionConfig::DoNothing),
        }
    }

    /// Replace the else branch.
    #[must_use]
    pub fn otherwise(mut self, else_clause: ElseClause) -> Self {
        self.else_clause = else_clause;
        self
    }

    /// Every action reachable from this clause, in chain order.
    #[must_use]
    pub fn actions(&self) -> Vec<&ActionConfig> {
        let mut out = vec![&self.action];
        match &self.else_clause {
            ElseClause::If(next) => out.extend(next.actions()),
            ElseClause::Action(action) => out.push(action),
        }
        out
    }

    /// Every leaf condition across the whole chain.
    #[must_use]
    pub fn conditions(&self) -> Vec<&SingleCondition> {
        let mut out = self.condition_group.leaves();
        if let ElseClause::If(next) = &self.else_clause {
            out.extend(next.conditions());
        }
        out
    }

    /// Check the clause chain is complete enough to run.
    ///
    /// Only the first condition of the chain may be `always_execute`, and
    /// when it is it must be the only one.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: placement of
    /// `always_execute` first, then each condition, then each action.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let conditions = self.conditions();
        if let Some((first, rest)) = conditions.split_first() {
            if rest
                .iter()
                .any(|c| c.operator == ConditionalOperator::AlwaysExecute)
            {
                return Err(ValidationError::NestedAlwaysExecute);
            }
            if first.operator == ConditionalOperator::AlwaysExecute && !rest.is_empty() {
                return Err(ValidationError::AlwaysExecuteNotAlone);
            }
        }

        for condition in conditions {
            condition.validate()?;
        }
        for action in self.actions() {
            action.validate()?;
        }
        Ok(())
    }
}
