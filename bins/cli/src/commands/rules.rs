//! `rules show` command handler.

use super::effective_rules;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use field_rules_config::EffectiveRules;
use field_rules_domain::{RuleKind, VerdictPolicy};
use std::fmt::Write as _;
use std::path::Path;

/// Print the effective registry and verdict policy.
pub fn run_rules_show(
    mode: OutputMode,
    rules_path: Option<&Path>,
    policy: Option<VerdictPolicy>,
) -> Result<CliOutput, CliError> {
    let rules = effective_rules(rules_path, policy)?;

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "policy": rules.policy,
            "registry": rules.registry,
        });
        to_json_line(&payload)?
    } else {
        format_rules_text(&rules)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_rules_text(rules: &EffectiveRules) -> String {
    let mut output = format!("policy: {}\n", rules.policy);
    for (schema, fields) in rules.registry.schemas() {
        let _ = writeln!(output, "{schema}");
        for (field, kinds) in fields.iter() {
            let tags: Vec<&str> = kinds.iter().copied().map(RuleKind::tag).collect();
            let _ = writeln!(output, "  {field}: {}", tags.join(", "));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{OutputArgs, OutputFormat};

    fn mode(format: OutputFormat) -> OutputMode {
        OutputMode::from_args(&OutputArgs {
            output: Some(format),
            json: false,
        })
    }

    #[test]
    fn builtin_rules_render_as_text() -> Result<(), CliError> {
        let output = run_rules_show(
            mode(OutputFormat::Text),
            None,
            Some(VerdictPolicy::AllRulesPass),
        )?;
        assert_eq!(
            output.stdout,
            "policy: all-rules-pass\nCourse\n  title: required\n  price: required, positive\n"
        );
        Ok(())
    }

    #[test]
    fn builtin_rules_render_as_json() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_rules_show(
            mode(OutputFormat::Json),
            None,
            Some(VerdictPolicy::LastRuleWins),
        )?;
        let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
        assert_eq!(value["policy"], "last-rule-wins");
        assert_eq!(
            value["registry"]["Course"]["price"],
            serde_json::json!(["required", "positive"])
        );
        Ok(())
    }
}
