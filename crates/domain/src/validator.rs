//! Evaluate registered rules against a subject.

use crate::{DomainError, FieldName, RuleKind, RuleRegistry, SchemaId, ValidationSubject};
use field_rules_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How individual rule results fold into one verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictPolicy {
    /// Valid iff every rule on every field passes.
    #[default]
    #[serde(alias = "all_rules_pass", alias = "allRulesPass")]
    AllRulesPass,
    /// Each rule result overwrites the verdict, so the last rule evaluated
    /// (last field, last rule) decides alone.
    #[serde(alias = "last_rule_wins", alias = "lastRuleWins")]
    LastRuleWins,
}

impl VerdictPolicy {
    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllRulesPass => "all-rules-pass",
            Self::LastRuleWins => "last-rule-wins",
        }
    }

    const fn fold(self, verdict: bool, passed: bool) -> bool {
        match self {
            Self::AllRulesPass => verdict && passed,
            Self::LastRuleWins => passed,
        }
    }
}

impl FromStr for VerdictPolicy {
    type Err = DomainError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "all-rules-pass" | "all_rules_pass" | "allRulesPass" => Ok(Self::AllRulesPass),
            "last-rule-wins" | "last_rule_wins" | "lastRuleWins" => Ok(Self::LastRuleWins),
            other => Err(DomainError::UnknownVerdictPolicy {
                input: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for VerdictPolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One failed rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    /// Field the rule is attached to.
    pub field: FieldName,
    /// Rule that failed.
    pub rule: RuleKind,
    /// Human-readable reason.
    pub message: Box<str>,
}

/// Detailed outcome of validating one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Schema the subject was looked up by.
    pub schema: SchemaId,
    /// Policy used to reach the verdict.
    pub policy: VerdictPolicy,
    /// Final verdict.
    pub valid: bool,
    /// Number of rule evaluations performed.
    pub checked: usize,
    /// Failed evaluations in evaluation order.
    ///
    /// Under [`VerdictPolicy::LastRuleWins`] this can be non-empty while
    /// `valid` is still true.
    pub failures: Vec<RuleFailure>,
}

impl ValidationReport {
    /// Turn a rejected report into an `ErrorEnvelope`.
    ///
    /// Metadata carries the schema and one `field.<name>` entry per failing
    /// field listing the failed rule tags.
    pub fn into_result(self) -> Result<Self, ErrorEnvelope> {
        if self.valid {
            return Ok(self);
        }

        let mut by_field: BTreeMap<String, Vec<&'static str>> = BTreeMap::new();
        for failure in &self.failures {
            let tags = by_field
                .entry(format!("field.{}", failure.field))
                .or_default();
            if !tags.contains(&failure.rule.tag()) {
                tags.push(failure.rule.tag());
            }
        }

        let mut envelope = ErrorEnvelope::expected(
            ErrorCode::rejected(),
            format!("{} failed validation", self.schema),
        )
        .with_metadata("schema", self.schema.as_str());
        for (key, tags) in by_field {
            envelope = envelope.with_metadata(key, tags.join(","));
        }
        Err(envelope)
    }
}

/// Rule evaluator configured with a verdict policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    policy: VerdictPolicy,
}

impl Validator {
    /// Create a validator using `policy`.
    #[must_use]
    pub const fn new(policy: VerdictPolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(self) -> VerdictPolicy {
        self.policy
    }

    /// Check `subject` and return only the verdict.
    pub fn validate(self, registry: &RuleRegistry, subject: &dyn ValidationSubject) -> bool {
        self.report(registry, subject).valid
    }

    /// Check `subject` against every rule registered for its schema.
    ///
    /// A schema without registered fields is vacuously valid. Field values
    /// are read from the subject at call time.
    pub fn report(
        self,
        registry: &RuleRegistry,
        subject: &dyn ValidationSubject,
    ) -> ValidationReport {
        let schema = subject.schema_id();
        let mut report = ValidationReport {
            schema: schema.clone(),
            policy: self.policy,
            valid: true,
            checked: 0,
            failures: Vec::new(),
        };

        let Some(fields) = registry.rules_for(schema) else {
            tracing::trace!(schema = %schema, "no rules registered; subject is valid");
            return report;
        };

        let mut verdict = true;
        for (field, rules) in fields.iter() {
            let value = subject.field(field);
            for &rule in rules {
                let passed = rule.check(&value);
                report.checked += 1;
                if !passed {
                    report.failures.push(RuleFailure {
                        field: field.clone(),
                        rule,
                        message: format!("{}, got {}", rule.failure_message(), value.type_name())
                            .into_boxed_str(),
                    });
                }
                verdict = self.policy.fold(verdict, passed);
            }
        }
        report.valid = verdict;

        tracing::debug!(
            schema = %schema,
            policy = %self.policy,
            checked = report.checked,
            failures = report.failures.len(),
            valid = report.valid,
            "validated subject"
        );
        report
    }
}

/// Validate `subject` with the default [`VerdictPolicy::AllRulesPass`].
pub fn validate(registry: &RuleRegistry, subject: &dyn ValidationSubject) -> bool {
    Validator::default().validate(registry, subject)
}
