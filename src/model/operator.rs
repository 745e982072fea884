//! Conditional operators and their metadata.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// Operator family, used to group operators by the kind of value they compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorGroup {
    /// Works on any response (`eq`, emptiness checks).
    Generic,
    /// Ordering comparisons.
    Number,
    /// Date comparisons.
    Date,
}

/// How a condition compares a response to its operand.
///
/// Deserializing an operator name outside this table fails with
/// [`ScriptError::UnhandledOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ConditionalOperator {
    /// Always holds.
    AlwaysExecute,
    /// String equality.
    Eq,
    /// Lexicographic greater-than.
    Gt,
    /// Lexicographic greater-than-or-equal.
    Gte,
    /// Lexicographic less-than.
    Lt,
    /// Lexicographic less-than-or-equal.
    Lte,
    /// Response is absent, empty, or `"null"`.
    IsEmpty,
    /// Negation of [`ConditionalOperator::IsEmpty`].
    IsNotEmpty,
    /// Response instant is strictly after the operand.
    After,
    /// Response instant is after or equal to the operand.
    AfterOrEqual,
    /// Response instant is strictly before the operand.
    Before,
    /// Response instant is before or equal to the operand.
    BeforeOrEqual,
    /// Response falls on the same calendar day as the operand.
    EqualsDate,
}

impl ConditionalOperator {
    /// Every operator, in display order.
    pub const ALL: [Self; 13] = [
        Self::AlwaysExecute,
        Self::Eq,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::IsEmpty,
        Self::IsNotEmpty,
        Self::After,
        Self::AfterOrEqual,
        Self::Before,
        Self::BeforeOrEqual,
        Self::EqualsDate,
    ];

    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlwaysExecute => "always_execute",
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
            Self::After => "after",
            Self::AfterOrEqual => "after_or_equal",
            Self::Before => "before",
            Self::BeforeOrEqual => "before_or_equal",
            Self::EqualsDate => "equals_date",
        }
    }

    /// Human-readable label, e.g. for a dropdown.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AlwaysExecute => "Always execute",
            Self::Eq => "Equals",
            Self::Gt => ">",
            Self::Gte => "≥",
            Self::Lt => "<",
            Self::Lte => "≤",
            Self::IsEmpty => "Is empty",
            Self::IsNotEmpty => "Is not empty",
            Self::After => "After",
            Self::AfterOrEqual => "After or equal",
            Self::Before => "Before",
            Self::BeforeOrEqual => "Before or equal",
            Self::EqualsDate => "Is on day",
        }
    }

    /// The family this operator belongs to.
    ///
    /// `always_execute` is filed under [`OperatorGroup::Generic`].
    #[must_use]
    pub const fn group(self) -> OperatorGroup {
        match self {
            Self::Gt | Self::Gte | Self::Lt | Self::Lte => OperatorGroup::Number,
            Self::After
            | Self::AfterOrEqual
            | Self::Before
            | Self::BeforeOrEqual
            | Self::EqualsDate => OperatorGroup::Date,
            Self::AlwaysExecute | Self::Eq | Self::IsEmpty | Self::IsNotEmpty => {
                OperatorGroup::Generic
            }
        }
    }

    /// True for the five date operators.
    #[must_use]
    pub const fn is_date_operator(self) -> bool {
        matches!(self.group(), OperatorGroup::Date)
    }

    /// True for the four ordering operators.
    #[must_use]
    pub const fn is_number_operator(self) -> bool {
        matches!(self.group(), OperatorGroup::Number)
    }

    /// True for `eq`, `is_empty` and `is_not_empty`.
    #[must_use]
    pub const fn is_generic_operator(self) -> bool {
        matches!(self, Self::Eq | Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Whether a condition using this operator needs a `value` operand.
    #[must_use]
    pub const fn requires_value(self) -> bool {
        !matches!(self, Self::AlwaysExecute | Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Whether a condition using this operator needs a `responseKey`.
    #[must_use]
    pub const fn requires_response_key(self) -> bool {
        !matches!(self, Self::AlwaysExecute)
    }
}

impl fmt::Display for ConditionalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionalOperator {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ScriptError::UnhandledOperator {
                operator: s.to_string(),
            })
    }
}

impl TryFrom<String> for ConditionalOperator {
    type Error = ScriptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_wire_names_round_trip() {
        for op in ConditionalOperator::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
            let back: ConditionalOperator = serde_json::from_str(&json).unwrap();
            assert_eq!(back, op);
        }
    }

    #[test]
    fn test_unknown_operator_is_unhandled() {
        let err = "contains".parse::<ConditionalOperator>().unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnhandledOperator {
                operator: "contains".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_operator_fails_deserialization() {
        let err = serde_json::from_str::<ConditionalOperator>("\"contains\"").unwrap_err();
        assert!(err
            .to_string()
            .contains("Unhandled conditional operator: contains"));
    }

    #[test_case(ConditionalOperator::Eq, OperatorGroup::Generic)]
    #[test_case(ConditionalOperator::IsEmpty, OperatorGroup::Generic)]
    #[test_case(ConditionalOperator::Gte, OperatorGroup::Number)]
    #[test_case(ConditionalOperator::Lt, OperatorGroup::Number)]
    #[test_case(ConditionalOperator::EqualsDate, OperatorGroup::Date)]
    #[test_case(ConditionalOperator::BeforeOrEqual, OperatorGroup::Date)]
    fn test_operator_group(op: ConditionalOperator, group: OperatorGroup) {
        assert_eq!(op.group(), group);
    }

    #[test]
    fn test_groups_partition_operators() {
        for op in ConditionalOperator::ALL {
            let memberships = [
                op.is_date_operator(),
                op.is_number_operator(),
                op.is_generic_operator(),
            ]
            .into_iter()
            .filter(|m| *m)
            .count();
            let expected = usize::from(op != ConditionalOperator::AlwaysExecute);
            assert_eq!(memberships, expected, "{op}");
        }
    }

    #[test_case(ConditionalOperator::AlwaysExecute, false)]
    #[test_case(ConditionalOperator::IsEmpty, false)]
    #[test_case(ConditionalOperator::IsNotEmpty, false)]
    #[test_case(ConditionalOperator::Eq, true)]
    #[test_case(ConditionalOperator::Gt, true)]
    #[test_case(ConditionalOperator::After, true)]
    fn test_requires_value(op: ConditionalOperator, expected: bool) {
        assert_eq!(op.requires_value(), expected);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ConditionalOperator::EqualsDate.display_name(), "Is on day");
        assert_eq!(ConditionalOperator::Gte.display_name(), "≥");
    }
}
