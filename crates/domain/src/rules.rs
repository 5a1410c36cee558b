//! Rule kinds and their predicates.

use crate::{DomainError, FieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single validation predicate that can be attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// The value must be truthy.
    #[serde(rename = "required")]
    Required,
    /// The value must be a number strictly greater than zero.
    #[serde(
        rename = "positive",
        alias = "positive_number",
        alias = "positiveNumber"
    )]
    PositiveNumber,
}

impl RuleKind {
    /// Every rule kind, in declaration order.
    pub const ALL: [Self; 2] = [Self::Required, Self::PositiveNumber];

    /// Stable tag used in rule tables and reports.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::PositiveNumber => "positive",
        }
    }

    /// Evaluate this rule against the current field value.
    #[must_use]
    pub fn check(self, value: &FieldValue) -> bool {
        match self {
            Self::Required => value.is_truthy(),
            Self::PositiveNumber => value.as_number().is_some_and(|number| number > 0.0),
        }
    }

    /// User-facing explanation for a failed check.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Required => "value is required",
            Self::PositiveNumber => "value must be a positive number",
        }
    }
}

impl FromStr for RuleKind {
    type Err = DomainError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "required" => Ok(Self::Required),
            "positive" | "positive_number" | "positiveNumber" => Ok(Self::PositiveNumber),
            other => Err(DomainError::UnknownRule {
                tag: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.tag())
    }
}
