//! Screens and the interview that owns them.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ActionConfig, ConditionalAction};
use crate::error::ValidationError;

/// One page of an interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    /// Screen id.
    pub id: String,
    /// Title of the page.
    #[serde(default)]
    pub title: String,
    /// Description text for the page.
    #[serde(default)]
    pub header_text: String,
    /// Whether the screen is part of the initial navigation stack.
    #[serde(default)]
    pub is_in_starting_state: bool,
    /// Position within the initial stack, lowest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_state_order: Option<u32>,
}

impl Screen {
    /// Create a screen with only an id and title.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            header_text: String::new(),
            is_in_starting_state: false,
            starting_state_order: None,
        }
    }

    /// Mark the screen as part of the starting state at `order`.
    #[must_use]
    pub fn starting_at(mut self, order: u32) -> Self {
        self.is_in_starting_state = true;
        self.starting_state_order = Some(order);
        self
    }
}

/// An interview definition: screens, starting state, and per-screen actions.
///
/// Read-only from the interpreter's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    /// Interview id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// All screens.
    pub screens: Vec<Screen>,
    /// Explicit starting screen ids, first shown first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starting_state: Vec<String>,
    /// Candidate actions per screen id, in declaration order.
    #[serde(default)]
    pub actions: BTreeMap<String, Vec<ConditionalAction>>,
}

impl Interview {
    /// Create an empty interview.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a screen.
    #[must_use]
    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screens.push(screen);
        self
    }

    /// Append a candidate action to a screen.
    #[must_use]
    pub fn with_action(mut self, screen_id: impl Into<String>, action: ConditionalAction) -> Self {
        self.actions.entry(screen_id.into()).or_default().push(action);
        self
    }

    /// Set the explicit starting state.
    #[must_use]
    pub fn with_starting_state<I, S>(mut self, screen_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.starting_state = screen_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Look up a screen by id.
    #[must_use]
    pub fn screen(&self, id: &str) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    /// Candidate actions for a screen; empty when none are declared.
    #[must_use]
    pub fn actions_for(&self, screen_id: &str) -> &[ConditionalAction] {
        self.actions.get(screen_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Starting screen ids in visitation order.
    ///
    /// The explicit `startingState` list wins when non-empty. Otherwise the
    /// screens flagged `isInStartingState` with an order are used, lowest
    /// `startingStateOrder` first.
    #[must_use]
    pub fn starting_screen_ids(&self) -> Vec<&str> {
        if !self.starting_state.is_empty() {
            return self.starting_state.iter().map(String::as_str).collect();
        }

        let mut flagged: Vec<(u32, &str)> = self
            .screens
            .iter()
            .filter(|s| s.is_in_starting_state)
            .filter_map(|s| s.starting_state_order.map(|order| (order, s.id.as_str())))
            .collect();
        flagged.sort_by_key(|(order, _)| *order);
        flagged.into_iter().map(|(_, id)| id).collect()
    }

    /// Check every action and every screen reference.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: starting-state
    /// references, then each screen's actions in declaration order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let known: HashSet<&str> = self.screens.iter().map(|s| s.id.as_str()).collect();

        for id in self.starting_screen_ids() {
            if !known.contains(id) {
                return Err(ValidationError::UnknownScreen {
                    screen_id: id.to_string(),
                    referenced_by: "starting state".to_string(),
                });
            }
        }

        for (screen_id, actions) in &self.actions {
            for action in actions {
                action.validate()?;
                if let ActionConfig::Push(targets) = &action.action_config {
                    if let Some(missing) = targets.iter().find(|t| !known.contains(t.as_str())) {
                        return Err(ValidationError::UnknownScreen {
                            screen_id: missing.clone(),
                            referenced_by: format!("a push action on screen '{screen_id}'"),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
