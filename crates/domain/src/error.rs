//! Domain error taxonomy.

use field_rules_shared::{ErrorCode, ErrorEnvelope};
use std::borrow::Cow;
use std::fmt;

/// Failures raised while building registries, subjects, or typed records.
///
/// Validation itself never produces one of these; a failing subject is a
/// `false` verdict, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// `SchemaId` is empty after trimming.
    EmptySchemaId {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `FieldName` is empty after trimming.
    EmptyFieldName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Rule tag does not name a known rule kind.
    UnknownRule {
        /// Tag as provided.
        tag: String,
    },
    /// Verdict policy name is not recognized.
    UnknownVerdictPolicy {
        /// Name as provided.
        input: String,
    },
    /// Subject payload is not shaped like `{ "schema": .., "fields": {..} }`.
    InvalidSubject {
        /// What was wrong with the payload.
        reason: Cow<'static, str>,
    },
    /// Direct price assignment rejected by the setter.
    NonPositivePrice {
        /// Rejected value.
        value: f64,
    },
}

impl DomainError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptySchemaId { .. } => ErrorCode::new("domain", "invalid_schema_id"),
            Self::EmptyFieldName { .. } => ErrorCode::new("domain", "invalid_field_name"),
            Self::UnknownRule { .. } => ErrorCode::new("domain", "unknown_rule"),
            Self::UnknownVerdictPolicy { .. } => {
                ErrorCode::new("domain", "unknown_verdict_policy")
            },
            Self::InvalidSubject { .. } => ErrorCode::new("domain", "invalid_subject"),
            Self::NonPositivePrice { .. } => ErrorCode::new("domain", "invalid_price"),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySchemaId { .. } => formatter.write_str("SchemaId must be non-empty"),
            Self::EmptyFieldName { .. } => formatter.write_str("FieldName must be non-empty"),
            Self::UnknownRule { tag } => write!(formatter, "unknown rule `{tag}`"),
            Self::UnknownVerdictPolicy { input } => {
                write!(formatter, "unknown verdict policy `{input}`")
            },
            Self::InvalidSubject { reason } => write!(formatter, "invalid subject: {reason}"),
            Self::NonPositivePrice { .. } => {
                formatter.write_str("Invalid price - should be positive!")
            },
        }
    }
}

impl std::error::Error for DomainError {}

impl From<DomainError> for ErrorEnvelope {
    fn from(error: DomainError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            DomainError::EmptySchemaId { input_length }
            | DomainError::EmptyFieldName { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
            DomainError::UnknownRule { tag } => envelope.with_metadata("tag", tag),
            DomainError::UnknownVerdictPolicy { input } => envelope.with_metadata("input", input),
            DomainError::InvalidSubject { .. } => envelope,
            DomainError::NonPositivePrice { value } => {
                envelope.with_metadata("value", value.to_string())
            },
        }
    }
}
