//! Condition evaluation.
//!
//! This module provides:
//! - [`resolve_response_value`]: turn a response key (and optional field)
//!   into the string the operators compare
//! - [`ConditionEvaluator`]: apply one operator, a condition tree, or an
//!   if/else chain against the current responses
//! - [`evaluate`]: one-shot evaluation with the default configuration
//!
//! Evaluation never mutates the responses. The only failure is a date
//! operand that does not parse.

mod dates;

pub use dates::{calendar_day, parse_date};

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Config;
use crate::error::ScriptError;
use crate::model::{
    ActionConfig, Condition, ConditionGroup, ConditionalAction, ConditionalOperator, ElseClause,
    GroupKind, IfClause, ResponseData, SingleCondition,
};

/// Resolve the value a condition compares against.
///
/// Returns `None` when the key is unset or has no response. See
/// [`crate::model::Answer::resolve`] for how records are flattened.
#[must_use]
pub fn resolve_response_value(
    condition: &SingleCondition,
    responses: &ResponseData,
) -> Option<String> {
    let key = condition.response_key.as_deref()?;
    responses
        .get(key)
        .map(|entry| entry.response.resolve(condition.response_key_field.as_deref()))
}

/// Evaluate one conditional action with the default configuration.
///
/// # Errors
///
/// Returns [`ScriptError::InvalidDateFormat`] when a date operator meets an
/// unparsable operand.
pub fn evaluate(action: &ConditionalAction, responses: &ResponseData) -> Result<bool, ScriptError> {
    ConditionEvaluator::default().evaluate(action, responses)
}

/// Applies conditional operators to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionEvaluator {
    null_date: NaiveDate,
}

impl ConditionEvaluator {
    /// Create an evaluator from configuration.
    #[must_use]
    pub const fn new(config: &Config) -> Self {
        Self {
            null_date: config.null_date,
        }
    }

    /// Date the literal `"null"` parses to.
    #[must_use]
    pub const fn null_date(&self) -> NaiveDate {
        self.null_date
    }

    /// Decide whether a conditional action should fire.
    ///
    /// # Errors
    ///
    /// See [`ConditionEvaluator::evaluate_condition`].
    pub fn evaluate(
        &self,
        action: &ConditionalAction,
        responses: &ResponseData,
    ) -> Result<bool, ScriptError> {
        self.evaluate_condition(&action.condition, responses)
    }

    /// Apply a single operator.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::InvalidDateFormat`] when a date operator's
    /// response or value is present but neither `"null"` nor an ISO date.
    pub fn evaluate_condition(
        &self,
        condition: &SingleCondition,
        responses: &ResponseData,
    ) -> Result<bool, ScriptError> {
        let operator = condition.operator;
        let key_unset = condition
            .response_key
            .as_deref()
            .map_or(true, str::is_empty);
        if operator == ConditionalOperator::AlwaysExecute || key_unset {
            return Ok(true);
        }

        let resolved = resolve_response_value(condition, responses);
        let response = resolved.as_deref();
        let value = condition.value.as_deref();

        let result = match operator {
            ConditionalOperator::AlwaysExecute => true,
            ConditionalOperator::IsEmpty => is_empty(response),
            ConditionalOperator::IsNotEmpty => !is_empty(response),
            ConditionalOperator::Eq => response.is_some_and(|r| Some(r) == value),
            ConditionalOperator::Gt => compare_text(OrderingComparison::Gt, response, value),
            ConditionalOperator::Gte => compare_text(OrderingComparison::Gte, response, value),
            ConditionalOperator::Lt => compare_text(OrderingComparison::Lt, response, value),
            ConditionalOperator::Lte => compare_text(OrderingComparison::Lte, response, value),
            ConditionalOperator::After => {
                self.compare_dates(DateComparison::After, response, value)?
            }
            ConditionalOperator::AfterOrEqual => {
                self.compare_dates(DateComparison::AfterOrEqual, response, value)?
            }
            ConditionalOperator::Before => {
                self.compare_dates(DateComparison::Before, response, value)?
            }
            ConditionalOperator::BeforeOrEqual => {
                self.compare_dates(DateComparison::BeforeOrEqual, response, value)?
            }
            ConditionalOperator::EqualsDate => {
                self.compare_dates(DateComparison::SameDay, response, value)?
            }
        };

        debug!(
            operator = %operator,
            response_key = condition.response_key.as_deref().unwrap_or_default(),
            resolved = resolved.as_deref().unwrap_or("<absent>"),
            result,
            "Evaluated condition"
        );
        Ok(result)
    }

    /// Evaluate a condition tree.
    ///
    /// AND stops at the first false child and OR at the first true one, so
    /// only evaluated leaves can raise errors. An empty AND holds and an
    /// empty OR does not.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by an evaluated leaf.
    pub fn evaluate_group(
        &self,
        group: &ConditionGroup,
        responses: &ResponseData,
    ) -> Result<bool, ScriptError> {
        match group.kind {
            GroupKind::And => {
                for condition in &group.conditions {
                    if !self.evaluate_node(condition, responses)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            GroupKind::Or => {
                for condition in &group.conditions {
                    if self.evaluate_node(condition, responses)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Walk an if/else chain and return the action it selects.
    ///
    /// # Errors
    ///
    /// Propagates errors from the condition groups it evaluates.
    pub fn select_action<'c>(
        &self,
        clause: &'c IfClause,
        responses: &ResponseData,
    ) -> Result<&'c ActionConfig, ScriptError> {
        let mut current = clause;
        loop {
            if self.evaluate_group(&current.condition_group, responses)? {
                return Ok(&current.action);
            }
            match &current.else_clause {
                ElseClause::If(next) => current = next,
                ElseClause::Action(action) => return Ok(action),
            }
        }
    }

    fn evaluate_node(
        &self,
        condition: &Condition,
        responses: &ResponseData,
    ) -> Result<bool, ScriptError> {
        match condition {
            Condition::Single(single) => self.evaluate_condition(single, responses),
            Condition::Group(group) => self.evaluate_group(group, responses),
        }
    }

    /// Both sides must be present and non-empty before either is parsed.
    fn compare_dates(
        &self,
        comparison: DateComparison,
        response: Option<&str>,
        value: Option<&str>,
    ) -> Result<bool, ScriptError> {
        let Some((response, value)) = non_empty_pair(response, value) else {
            return Ok(false);
        };
        let left = parse_date(response, self.null_date)?;
        let right = parse_date(value, self.null_date)?;

        Ok(match comparison {
            DateComparison::SameDay => calendar_day(&left) == calendar_day(&right),
            DateComparison::After => left > right,
            DateComparison::AfterOrEqual => left >= right,
            DateComparison::Before => left < right,
            DateComparison::BeforeOrEqual => left <= right,
        })
    }
}

impl IfClause {
    /// Pick the action this chain selects for `responses`.
    ///
    /// # Errors
    ///
    /// See [`ConditionEvaluator::select_action`].
    pub fn resolve<'c>(
        &'c self,
        evaluator: &ConditionEvaluator,
        responses: &ResponseData,
    ) -> Result<&'c ActionConfig, ScriptError> {
        evaluator.select_action(self, responses)
    }
}

fn is_empty(resolved: Option<&str>) -> bool {
    matches!(resolved, None | Some("" | "null"))
}

fn non_empty_pair<'a>(left: Option<&'a str>, right: Option<&'a str>) -> Option<(&'a str, &'a str)> {
    left.zip(right).filter(|(l, r)| !l.is_empty() && !r.is_empty())
}

/// Both sides must be present and non-empty; bytes compare lexicographically.
fn compare_text(comparison: OrderingComparison, response: Option<&str>, value: Option<&str>) -> bool {
    non_empty_pair(response, value)
        .is_some_and(|(response, value)| comparison.holds(response.cmp(value)))
}

/// Text ordering operators.
#[derive(Debug, Clone, Copy)]
enum OrderingComparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl OrderingComparison {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Date operators.
#[derive(Debug, Clone, Copy)]
enum DateComparison {
    After,
    AfterOrEqual,
    Before,
    BeforeOrEqual,
    SameDay,
}
