//! Actions attached to screens, and the single-condition record that guards them.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ConditionalOperator, ResponseData};
use crate::error::ValidationError;

/// Delimiter between screen ids in a serialized push payload.
pub const PUSH_ACTION_DELIMITER: &str = ";";

/// Discriminant of an [`ActionConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Enqueue screens.
    Push,
    /// Skip the next screen, answering on the respondent's behalf.
    Skip,
    /// Snapshot the navigation stack.
    Checkpoint,
    /// Roll the navigation stack back to a snapshot.
    Restore,
    /// Record progress.
    Milestone,
    /// Finish the interview.
    EndInterview,
    /// Do nothing.
    DoNothing,
}

impl ActionType {
    /// Wire name of the action type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Skip => "skip",
            Self::Checkpoint => "checkpoint",
            Self::Restore => "restore",
            Self::Milestone => "milestone",
            Self::EndInterview => "end_interview",
            Self::DoNothing => "do_nothing",
        }
    }

    /// Human-readable label, e.g. for a dropdown.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Push => "Go to stage",
            Self::Skip => "Skip",
            Self::Checkpoint => "Checkpoint",
            Self::Restore => "Restore",
            Self::Milestone => "Milestone",
            Self::EndInterview => "End interview",
            Self::DoNothing => "Do nothing",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ActionConfig {
    /// Screen ids to visit next, in visitation order.
    Push(Vec<String>),
    /// Answers to inject while skipping the next screen.
    Skip(ResponseData),
    /// Name to snapshot the navigation stack under.
    Checkpoint(String),
    /// Name of the snapshot to restore.
    Restore(String),
    /// Name of the milestone passed.
    Milestone(String),
    /// Finish the interview.
    EndInterview,
    /// Explicit no-op, typically an `else` branch.
    DoNothing,
}

impl ActionConfig {
    /// The discriminant of this action.
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            Self::Push(_) => ActionType::Push,
            Self::Skip(_) => ActionType::Skip,
            Self::Checkpoint(_) => ActionType::Checkpoint,
            Self::Restore(_) => ActionType::Restore,
            Self::Milestone(_) => ActionType::Milestone,
            Self::EndInterview => ActionType::EndInterview,
            Self::DoNothing => ActionType::DoNothing,
        }
    }

    /// Convenience constructor for a push action.
    #[must_use]
    pub fn push<I, S>(screen_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Push(screen_ids.into_iter().map(Into::into).collect())
    }

    /// Check that the action is complete enough to run.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPushPayload`] for a push with no targets.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Push(ids) if ids.is_empty() => Err(ValidationError::EmptyPushPayload),
            _ => Ok(()),
        }
    }

    /// Decode the flat storage representation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPayload`] when a skip payload is
    /// missing or is not a JSON response map.
    pub fn from_serialized(serialized: &SerializedActionConfig) -> Result<Self, ValidationError> {
        let payload = serialized.payload.clone().unwrap_or_default();
        Ok(match serialized.action_type {
            ActionType::Push => Self::Push(
                payload
                    .split(PUSH_ACTION_DELIMITER)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            ActionType::Skip => {
                let data = serde_json::from_str(&payload).map_err(|e| {
                    ValidationError::InvalidPayload {
                        action_type: ActionType::Skip.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Self::Skip(data)
            }
            ActionType::Checkpoint => Self::Checkpoint(payload),
            ActionType::Restore => Self::Restore(payload),
            ActionType::Milestone => Self::Milestone(payload),
            ActionType::EndInterview => Self::EndInterview,
            ActionType::DoNothing => Self::DoNothing,
        })
    }

    /// Encode into the flat storage representation.
    #[must_use]
    pub fn to_serialized(&self) -> SerializedActionConfig {
        let payload = match self {
            Self::Push(ids) => Some(ids.join(PUSH_ACTION_DELIMITER)),
            Self::Skip(data) => serde_json::to_string(data).ok(),
            Self::Checkpoint(name) | Self::Restore(name) | Self::Milestone(name) => {
                Some(name.clone())
            }
            Self::EndInterview | Self::DoNothing => None,
        };
        SerializedActionConfig {
            action_type: self.action_type(),
            payload,
        }
    }
}

/// Storage form of an action: a type tag and an optional string payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SerializedActionConfig {
    /// Action type.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Encoded payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

/// A single comparison against one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SingleCondition {
    /// Comparison to perform.
    #[serde(alias = "conditionalOperator")]
    pub operator: ConditionalOperator,
    /// Response to inspect. Only optional for `always_execute`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_key: Option<String>,
    /// Field to extract when the response is a record.
    #[serde(
        default,
        alias = "responseKeyLookupField",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_key_field: Option<String>,
    /// Operand. Unused by `always_execute`, `is_empty` and `is_not_empty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SingleCondition {
    /// A condition that always holds.
    #[must_use]
    pub const fn always() -> Self {
        Self {
            operator: ConditionalOperator::AlwaysExecute,
            response_key: None,
            response_key_field: None,
            value: None,
        }
    }

    /// A condition on `response_key` with no operand yet.
    #[must_use]
    pub fn new(operator: ConditionalOperator, response_key: impl Into<String>) -> Self {
        Self {
            operator,
            response_key: Some(response_key.into()),
            response_key_field: None,
            value: None,
        }
    }

    /// Set the operand.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the record field to extract.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.response_key_field = Some(field.into());
        self
    }

    /// Check that the condition names everything its operator needs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingResponseKey`] or
    /// [`ValidationError::MissingValue`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let operator = self.operator.display_name().to_string();
        if self.operator.requires_response_key()
            && self.response_key.as_deref().map_or(true, str::is_empty)
        {
            return Err(ValidationError::MissingResponseKey { operator });
        }
        if self.operator.requires_value() && self.value.is_none() {
            return Err(ValidationError::MissingValue { operator });
        }
        Ok(())
    }
}

/// A candidate action: one condition and the action it guards.
///
/// Evaluated once per processing of the screen it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalAction {
    /// Guard condition.
    #[serde(flatten)]
    pub condition: SingleCondition,
    /// Action to dispatch when the guard holds.
    pub action_config: ActionConfig,
}

impl ConditionalAction {
    /// Pair a condition with an action.
    #[must_use]
    pub const fn new(condition: SingleCondition, action_config: ActionConfig) -> Self {
        Self {
            condition,
            action_config,
        }
    }

    /// An action that runs every time its screen is processed.
    #[must_use]
    pub const fn always(action_config: ActionConfig) -> Self {
        Self::new(SingleCondition::always(), action_config)
    }

    /// Check both the condition and the action.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, condition first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.condition.validate()?;
        self.action_config.validate()
    }
}
