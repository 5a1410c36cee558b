//! CLI command handlers.

pub mod course;
pub mod info;
pub mod rules;
pub mod validate;

pub use course::{CourseCommandInput, run_course};
pub use info::run_info;
pub use rules::run_rules_show;
pub use validate::{ValidateCommandInput, run_validate};

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use field_rules_config::{EffectiveRules, load_effective_rules_std_env};
use field_rules_domain::{ValidationReport, VerdictPolicy};
use std::fmt::Write as _;
use std::path::Path;

/// Load rules (file or built-in table, then env) and apply the
/// `--verdict-policy` flag last.
pub fn effective_rules(
    rules_path: Option<&Path>,
    policy_flag: Option<VerdictPolicy>,
) -> Result<EffectiveRules, CliError> {
    let mut rules = load_effective_rules_std_env(rules_path)?;
    if let Some(policy) = policy_flag {
        rules.policy = policy;
    }
    Ok(rules)
}

/// Verdict labels used in text output.
#[derive(Debug, Clone, Copy)]
pub struct VerdictLabels {
    pub accepted: &'static str,
    pub rejected: &'static str,
}

/// Render a report. A failing verdict exits with [`ExitCode::Rejected`].
pub fn report_output(
    mode: OutputMode,
    report: ValidationReport,
    labels: VerdictLabels,
    accepted_detail: Option<&str>,
) -> Result<CliOutput, CliError> {
    let exit_code = if report.valid {
        ExitCode::Ok
    } else {
        ExitCode::Rejected
    };

    let stdout = if mode.is_json() {
        format_report_json(report)?
    } else {
        format_report_text(&report, labels, accepted_detail)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code,
    })
}

fn format_report_text(
    report: &ValidationReport,
    labels: VerdictLabels,
    accepted_detail: Option<&str>,
) -> String {
    let mut output = String::new();
    if report.valid {
        output.push_str(labels.accepted);
        if let Some(detail) = accepted_detail {
            let _ = write!(output, ": {detail}");
        }
    } else {
        output.push_str(labels.rejected);
    }
    output.push('\n');

    for failure in &report.failures {
        let _ = writeln!(
            output,
            "  {} ({}): {}",
            failure.field, failure.rule, failure.message
        );
    }
    output
}

fn format_report_json(report: ValidationReport) -> Result<String, CliError> {
    let status = if report.valid { "valid" } else { "invalid" };
    let report_value = serde_json::to_value(&report)?;

    let payload = match report.into_result() {
        Ok(_) => serde_json::json!({
            "status": status,
            "report": report_value,
        }),
        Err(envelope) => serde_json::json!({
            "status": status,
            "report": report_value,
            "error": envelope,
        }),
    };
    Ok(to_json_line(&payload)?)
}
