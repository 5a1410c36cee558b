//! Validate command handler.

use super::{VerdictLabels, effective_rules, report_output};
use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use field_rules_domain::{DynamicSubject, VerdictPolicy};
use field_rules_shared::ErrorEnvelope;
use std::path::Path;

const LABELS: VerdictLabels = VerdictLabels {
    accepted: "valid",
    rejected: "invalid",
};

/// Inputs for the validate command.
#[derive(Debug)]
pub struct ValidateCommandInput<'a> {
    /// Rule table path; the built-in course table when absent.
    pub rules_path: Option<&'a Path>,
    /// Subject as `{"schema": "...", "fields": {...}}`.
    pub subject_json: &'a str,
    /// `--verdict-policy` override.
    pub policy: Option<VerdictPolicy>,
}

/// Run the validate command.
pub fn run_validate(
    mode: OutputMode,
    input: &ValidateCommandInput<'_>,
) -> Result<CliOutput, CliError> {
    let rules = effective_rules(input.rules_path, input.policy)?;
    let subject = DynamicSubject::from_json_str(input.subject_json).map_err(ErrorEnvelope::from)?;

    let report = rules.validator().report(&rules.registry, &subject);
    tracing::info!(schema = %report.schema, valid = report.valid, "validate command finished");
    report_output(mode, report, LABELS, None)
}
