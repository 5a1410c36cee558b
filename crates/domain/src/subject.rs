//! Validation subjects: anything exposing a schema id and field values.

use crate::{DomainError, FieldName, FieldValue, SchemaId};
use serde_json::Value;
use std::collections::BTreeMap;

/// A record the validator can check.
pub trait ValidationSubject {
    /// Schema identity used for the registry lookup.
    fn schema_id(&self) -> &SchemaId;

    /// Current value of `field`; [`FieldValue::Undefined`] when absent.
    fn field(&self, field: &FieldName) -> FieldValue;
}

/// Untyped subject built from raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicSubject {
    schema: SchemaId,
    fields: BTreeMap<FieldName, FieldValue>,
}

impl DynamicSubject {
    /// Create a subject with no fields set.
    #[must_use]
    pub const fn new(schema: SchemaId) -> Self {
        Self {
            schema,
            fields: BTreeMap::new(),
        }
    }

    /// Set a field value, replacing any previous value.
    #[must_use]
    pub fn with_field(mut self, field: FieldName, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field value in place.
    pub fn set(&mut self, field: FieldName, value: impl Into<FieldValue>) {
        self.fields.insert(field, value.into());
    }

    /// Parse `{ "schema": "...", "fields": { ... } }`.
    ///
    /// `fields` may be omitted, which yields a subject with no values. The
    /// schema and field keys are taken verbatim, so lookups are exact.
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        let Value::Object(object) = value else {
            return Err(DomainError::InvalidSubject {
                reason: "expected a JSON object".into(),
            });
        };
        let Some(schema) = object.get("schema").and_then(Value::as_str) else {
            return Err(DomainError::InvalidSubject {
                reason: "missing string `schema`".into(),
            });
        };
        let mut subject = Self::new(SchemaId::exact(schema));

        match object.get("fields") {
            None | Some(Value::Null) => {},
            Some(Value::Object(fields)) => {
                for (name, value) in fields {
                    subject.set(FieldName::exact(name.as_str()), FieldValue::from(value));
                }
            },
            Some(_) => {
                return Err(DomainError::InvalidSubject {
                    reason: "`fields` must be an object".into(),
                });
            },
        }

        Ok(subject)
    }

    /// Parse a subject from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(input).map_err(|error| DomainError::InvalidSubject {
                reason: format!("input is not valid JSON: {error}").into(),
            })?;
        Self::from_json(&value)
    }
}

impl ValidationSubject for DynamicSubject {
    fn schema_id(&self) -> &SchemaId {
        &self.schema
    }

    fn field(&self, field: &FieldName) -> FieldValue {
        self.fields.get(field).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_schema_and_fields() -> Result<(), DomainError> {
        let subject = DynamicSubject::from_json(&json!({
            "schema": "Course",
            "fields": { "title": "Algorithms", "price": 10 }
        }))?;

        assert_eq!(subject.schema_id().as_str(), "Course");
        assert_eq!(
            subject.field(&FieldName::parse("price")?),
            FieldValue::Number(10.0)
        );
        assert_eq!(
            subject.field(&FieldName::parse("missing")?),
            FieldValue::Undefined
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(DynamicSubject::from_json(&json!([1, 2])).is_err());
        assert!(DynamicSubject::from_json(&json!({ "fields": {} })).is_err());
        assert!(DynamicSubject::from_json(&json!({ "schema": "A", "fields": 3 })).is_err());
        assert!(DynamicSubject::from_json_str("{").is_err());
    }

    #[test]
    fn keys_are_matched_exactly() -> Result<(), DomainError> {
        let subject = DynamicSubject::from_json_str(
            r#"{"schema":" Course","fields":{"title ":"Algorithms","":0}}"#,
        )?;

        assert_eq!(subject.schema_id().as_str(), " Course");
        assert_eq!(
            subject.field(&FieldName::from_static("title")),
            FieldValue::Undefined
        );
        assert_eq!(
            subject.field(&FieldName::exact("title ")),
            FieldValue::Text("Algorithms".to_owned())
        );
        assert_eq!(subject.field(&FieldName::exact("")), FieldValue::Number(0.0));
        Ok(())
    }

    #[test]
    fn json_syntax_errors_keep_their_position() -> Result<(), &'static str> {
        let Err(DomainError::InvalidSubject { reason }) =
            DynamicSubject::from_json_str("{\"schema\": }")
        else {
            return Err("expected an invalid subject error");
        };
        assert!(reason.contains("line 1 column"), "reason: {reason}");
        Ok(())
    }

    #[test]
    fn explicit_null_differs_from_missing() -> Result<(), DomainError> {
        let subject = DynamicSubject::from_json_str(r#"{"schema":"A","fields":{"x":null}}"#)?;
        assert_eq!(subject.field(&FieldName::parse("x")?), FieldValue::Null);
        Ok(())
    }
}
