//! Course form command: the submit handler of the course form.
//!
//! Raw form strings are coerced the way a numeric input box is read, the
//! course is checked against the registry, and the user is told whether the
//! submission went through.

use super::{VerdictLabels, effective_rules, report_output};
use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use field_rules_domain::{Course, FieldValue, VerdictPolicy};

const LABELS: VerdictLabels = VerdictLabels {
    accepted: "accepted",
    rejected: "Invalid input, please try again!",
};

/// Raw form inputs for the course command.
#[derive(Debug)]
pub struct CourseCommandInput<'a> {
    /// Title box contents.
    pub title: &'a str,
    /// Price box contents, before numeric coercion.
    pub price: &'a str,
    /// `--verdict-policy` override.
    pub policy: Option<VerdictPolicy>,
}

/// Run the course command.
pub fn run_course(mode: OutputMode, input: &CourseCommandInput<'_>) -> Result<CliOutput, CliError> {
    let rules = effective_rules(None, input.policy)?;

    let price = FieldValue::from_numeric_input(input.price)
        .as_number()
        .unwrap_or(f64::NAN);
    let course = Course::new(input.title, price);

    let report = rules.validator().report(&rules.registry, &course);
    let detail = format!("{} ({})", course.title(), course.price());
    report_output(mode, report, LABELS, Some(&detail))
}
