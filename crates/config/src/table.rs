//! Declarative rule tables.
//!
//! A rule table is plain data: schemas, their fields in order, and rule tags
//! per field. Fields are a list rather than a map so that file order is the
//! evaluation order.

use field_rules_domain::{
    Course, DomainError, FieldName, RuleKind, RuleRegistry, SchemaId, VerdictPolicy,
};
use field_rules_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};

/// Current supported rule table version.
pub const CURRENT_RULE_TABLE_VERSION: u32 = 1;

const fn default_version() -> u32 {
    CURRENT_RULE_TABLE_VERSION
}

/// Root of a rule table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleTable {
    /// Table format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Verdict policy requested by the table (env may override).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict_policy: Option<VerdictPolicy>,
    /// Schemas in declaration order.
    #[serde(default)]
    pub schemas: Vec<SchemaRules>,
}

/// Field declarations for one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaRules {
    /// Schema id.
    pub schema: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldRuleSpec>,
}

/// Rule tags attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldRuleSpec {
    /// Field name.
    pub name: String,
    /// Rule tags (`required`, `positive`).
    pub rules: Vec<String>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            version: CURRENT_RULE_TABLE_VERSION,
            verdict_policy: None,
            schemas: Vec::new(),
        }
    }
}

impl RuleTable {
    /// Table for the course submission form.
    #[must_use]
    pub fn builtin_course() -> Self {
        let field = |name: &FieldName, rules: &[RuleKind]| FieldRuleSpec {
            name: name.to_string(),
            rules: rules.iter().map(|rule| rule.tag().to_owned()).collect(),
        };
        Self {
            schemas: vec![SchemaRules {
                schema: Course::schema().to_string(),
                fields: vec![
                    field(&Course::TITLE, &[RuleKind::Required]),
                    field(
                        &Course::PRICE,
                        &[RuleKind::Required, RuleKind::PositiveNumber],
                    ),
                ],
            }],
            ..Self::default()
        }
    }

    /// Build a registry, registering rules in table order.
    ///
    /// Blank names and unknown tags are reported with their table position.
    pub fn to_registry(&self) -> Result<RuleRegistry, ErrorEnvelope> {
        if self.version != CURRENT_RULE_TABLE_VERSION {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_version"),
                "unsupported rule table version",
            )
            .with_metadata("found", self.version.to_string())
            .with_metadata("supported", CURRENT_RULE_TABLE_VERSION.to_string()));
        }

        let mut registry = RuleRegistry::new();
        for (schema_index, schema_rules) in self.schemas.iter().enumerate() {
            let at_schema = |error: DomainError| {
                table_error(error).with_metadata("schemas", schema_index.to_string())
            };
            let schema = SchemaId::parse(&schema_rules.schema).map_err(at_schema)?;

            for (field_index, spec) in schema_rules.fields.iter().enumerate() {
                let at_field = |error: DomainError| {
                    at_schema(error).with_metadata("fields", field_index.to_string())
                };
                let field = FieldName::parse(&spec.name).map_err(at_field)?;
                for tag in &spec.rules {
                    let rule = tag.parse::<RuleKind>().map_err(at_field)?;
                    registry.register(schema.clone(), field.clone(), rule);
                }
            }
        }

        Ok(registry)
    }
}

fn table_error(error: DomainError) -> ErrorEnvelope {
    let message = format!("invalid rule table: {error}");
    let mut envelope: ErrorEnvelope = error.into();
    envelope.code = ErrorCode::new("config", "invalid_rule_table");
    envelope.message = message;
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_course_matches_course_declarations() -> Result<(), ErrorEnvelope> {
        let mut expected = RuleRegistry::new();
        Course::declare(&mut expected);

        assert_eq!(RuleTable::builtin_course().to_registry()?, expected);
        Ok(())
    }

    #[test]
    fn unknown_tag_reports_position() -> Result<(), &'static str> {
        let table = RuleTable {
            schemas: vec![SchemaRules {
                schema: "Course".to_string(),
                fields: vec![
                    FieldRuleSpec {
                        name: "title".to_string(),
                        rules: vec!["required".to_string()],
                    },
                    FieldRuleSpec {
                        name: "email".to_string(),
                        rules: vec!["email".to_string()],
                    },
                ],
            }],
            ..RuleTable::default()
        };

        let Err(error) = table.to_registry() else {
            return Err("expected an unknown rule error");
        };
        assert_eq!(error.code, ErrorCode::new("config", "invalid_rule_table"));
        assert_eq!(error.metadata.get("tag").map(String::as_str), Some("email"));
        assert_eq!(error.metadata.get("schemas").map(String::as_str), Some("0"));
        assert_eq!(error.metadata.get("fields").map(String::as_str), Some("1"));
        Ok(())
    }

    #[test]
    fn rejects_future_versions() {
        let table = RuleTable {
            version: 2,
            ..RuleTable::default()
        };
        let result = table.to_registry();
        assert!(
            matches!(result, Err(ref error) if error.code.code() == "unsupported_version")
        );
    }

    #[test]
    fn empty_table_builds_empty_registry() -> Result<(), ErrorEnvelope> {
        assert!(RuleTable::default().to_registry()?.is_empty());
        Ok(())
    }
}
