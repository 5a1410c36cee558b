//! Identity primitives: schema ids and field names.

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Stable identity of a validated record type.
///
/// Registry lookups key on this rather than on a type's display name, so two
/// unrelated types only collide when they are deliberately given the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(Cow<'static, str>);

impl SchemaId {
    /// Parse a `SchemaId` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = input.as_ref();
        let Some(trimmed) = trimmed_non_empty(raw) else {
            return Err(DomainError::EmptySchemaId {
                input_length: raw.len(),
            });
        };

        Ok(Self(Cow::Owned(trimmed.to_owned())))
    }

    /// Take an identity exactly as a subject carries it.
    ///
    /// No trimming and no emptiness check: `" Course"` is a different
    /// schema from `"Course"`, and an empty id simply matches nothing.
    #[must_use]
    pub fn exact(input: impl Into<String>) -> Self {
        Self(Cow::Owned(input.into()))
    }

    /// Build a `SchemaId` from a literal declared in code.
    ///
    /// The literal must already be trimmed and non-empty.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        debug_assert!(!id.is_empty());
        Self(Cow::Borrowed(id))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SchemaId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Name of a field on a validated record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(Cow<'static, str>);

impl FieldName {
    /// Parse a `FieldName` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = input.as_ref();
        let Some(trimmed) = trimmed_non_empty(raw) else {
            return Err(DomainError::EmptyFieldName {
                input_length: raw.len(),
            });
        };

        Ok(Self(Cow::Owned(trimmed.to_owned())))
    }

    /// Take a field key exactly as a subject carries it.
    ///
    /// `"title "` stays distinct from `"title"`; an empty key is a field
    /// like any other and never matches a registered rule.
    #[must_use]
    pub fn exact(input: impl Into<String>) -> Self {
        Self(Cow::Owned(input.into()))
    }

    /// Build a `FieldName` from a literal declared in code.
    ///
    /// The literal must already be trimmed and non-empty.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.is_empty());
        Self(Cow::Borrowed(name))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn trimmed_non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
