//! Response data accumulated while an interview runs.
//!
//! The router owns and grows this map as screens are answered. The
//! interpreter only reads it; synthetic answers reach it through the
//! router's `skip` command.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// All responses for one interview run, keyed by response key.
pub type ResponseData = HashMap<String, ResponseEntry>;

/// A single answer.
///
/// Lookup-style questions answer with a whole record; everything else
/// answers with a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Answer {
    /// Plain text answer.
    Text(String),
    /// Structured record returned by a lookup.
    Record(Map<String, Value>),
}

impl Answer {
    /// Render the answer as the string the evaluator compares.
    ///
    /// With a `field`, a record yields that field coerced to a string, and
    /// the literal `"null"` when the field is absent. Without one, a record
    /// yields its canonical JSON. Text is returned as-is either way.
    #[must_use]
    pub fn resolve(&self, field: Option<&str>) -> String {
        match (self, field) {
            (Self::Text(text), _) => text.clone(),
            (Self::Record(record), Some(field)) => {
                record.get(field).map_or_else(|| "null".to_string(), value_to_string)
            }
            (Self::Record(record), None) => {
                serde_json::to_string(record).unwrap_or_default()
            }
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Map<String, Value>> for Answer {
    fn from(value: Map<String, Value>) -> Self {
        Self::Record(value)
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Objects and arrays serialize to compact JSON
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The question an answer came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryRef {
    /// Entry id.
    pub id: String,
    /// Screen the entry belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<String>,
    /// Prompt shown to the respondent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,
}

impl EntryRef {
    /// Create an entry reference with just an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            screen_id: None,
            prompt: String::new(),
        }
    }

    /// Attach the owning screen.
    #[must_use]
    pub fn with_screen(mut self, screen_id: impl Into<String>) -> Self {
        self.screen_id = Some(screen_id.into());
        self
    }
}

/// One stored response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResponseEntry {
    /// Originating question. Absent for synthetic answers injected by `skip`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryRef>,
    /// The answer itself.
    pub response: Answer,
}

impl ResponseEntry {
    /// Create a response without a source question.
    #[must_use]
    pub fn new(response: impl Into<Answer>) -> Self {
        Self {
            entry: None,
            response: response.into(),
        }
    }

    /// Attach the originating question.
    #[must_use]
    pub fn with_entry(mut self, entry: EntryRef) -> Self {
        self.entry = Some(entry);
        self
    }
}
