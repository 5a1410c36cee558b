//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use field_rules_config::{CURRENT_RULE_TABLE_VERSION, ENV_VERDICT_POLICY, config_crate_version};
use field_rules_domain::{RuleKind, VerdictPolicy, domain_crate_version};

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        format_info_json()?
    } else {
        format_info_text()
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn rule_tags() -> Vec<&'static str> {
    RuleKind::ALL.map(RuleKind::tag).to_vec()
}

fn format_info_text() -> String {
    format!(
        "status: ok\nname: {}\nversion: {}\ndomain: {}\nconfig: {}\nrule table version: {}\nrules: {}\ndefault policy: {}\npolicy env: {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        domain_crate_version(),
        config_crate_version(),
        CURRENT_RULE_TABLE_VERSION,
        rule_tags().join(", "),
        VerdictPolicy::default(),
        ENV_VERDICT_POLICY,
    )
}

fn format_info_json() -> Result<String, CliError> {
    let payload = serde_json::json!({
        "status": "ok",
        "build": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "domainVersion": domain_crate_version(),
            "configVersion": config_crate_version(),
        },
        "ruleTableVersion": CURRENT_RULE_TABLE_VERSION,
        "rules": rule_tags(),
        "defaultPolicy": VerdictPolicy::default(),
        "policyEnv": ENV_VERDICT_POLICY,
    });
    Ok(to_json_line(&payload)?)
}
