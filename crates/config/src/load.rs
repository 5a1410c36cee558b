//! Rule table loading (file + env).
//!
//! Errors are surfaced as typed `ErrorEnvelope`s with the `config` namespace.

use crate::{RuleTable, RulesEnv};
use field_rules_domain::{RuleRegistry, Validator, VerdictPolicy};
use field_rules_shared::{
    ErrorCode, ErrorEnvelope, ErrorKind, ResultExt, UnexpectedError, normalize_unexpected_error,
};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Registry and policy ready for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRules {
    /// Registry built from the rule table.
    pub registry: RuleRegistry,
    /// Policy after env overrides.
    pub policy: VerdictPolicy,
}

impl EffectiveRules {
    /// Validator configured with the effective policy.
    #[must_use]
    pub const fn validator(&self) -> Validator {
        Validator::new(self.policy)
    }
}

/// Parse a rule table from JSON text.
pub fn parse_rule_table_json(input: &str) -> Result<RuleTable, ErrorEnvelope> {
    parse_rule_table(input, ConfigFormat::Json)
}

/// Parse a rule table from TOML text.
pub fn parse_rule_table_toml(input: &str) -> Result<RuleTable, ErrorEnvelope> {
    parse_rule_table(input, ConfigFormat::Toml)
}

/// Read and parse a rule table, picking the format from the extension.
pub fn load_rule_table_from_path(path: &Path) -> Result<RuleTable, ErrorEnvelope> {
    let format = detect_config_format(path)?;
    let text = read_config_file(path)?;
    parse_rule_table(&text, format).with_metadata("path", path.to_string_lossy())
}

/// Build the registry and apply env overrides.
///
/// Precedence for the verdict policy (highest wins):
/// - env (`FIELD_RULES_VERDICT_POLICY`)
/// - the table's `verdictPolicy`
/// - `VerdictPolicy::default()`
pub fn load_effective_rules(
    table: &RuleTable,
    env: &RulesEnv,
) -> Result<EffectiveRules, ErrorEnvelope> {
    let registry = table.to_registry()?;
    let policy = env
        .verdict_policy
        .or(table.verdict_policy)
        .unwrap_or_default();

    tracing::debug!(
        schemas = registry.len(),
        policy = %policy,
        "loaded effective rules"
    );
    Ok(EffectiveRules { registry, policy })
}

/// Load effective rules from an optional path and the process environment.
///
/// Without a path, the built-in course table is used.
pub fn load_effective_rules_std_env(
    rules_path: Option<&Path>,
) -> Result<EffectiveRules, ErrorEnvelope> {
    let env = RulesEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    let table = match rules_path {
        None => RuleTable::builtin_course(),
        Some(path) => load_rule_table_from_path(path)?,
    };
    load_effective_rules(&table, &env)
}

/// Serialize a rule table as pretty JSON (with trailing newline).
pub fn to_pretty_json(table: &RuleTable) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(table)
        .map_err(|error| normalize_unexpected_error(UnexpectedError::error(error)))?;
    output.push('\n');
    Ok(output)
}

fn parse_rule_table(input: &str, format: ConfigFormat) -> Result<RuleTable, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid rule table JSON: {error}"),
            )
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid rule table TOML: {error}"),
            )
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path)
        .with_metadata("path", path.to_string_lossy())
        .map_err(rules_file_error)
}

/// Re-code a normalized io envelope into the `config` namespace.
///
/// A rules file the user pointed at is an input problem, so the kind
/// becomes `Expected`; the retry class is kept.
fn rules_file_error(error: ErrorEnvelope) -> ErrorEnvelope {
    let code = match error.code.code() {
        "not_found" => "rules_file_not_found",
        "permission_denied" => "rules_file_permission_denied",
        _ => "rules_file_io",
    };
    ErrorEnvelope {
        kind: ErrorKind::Expected,
        code: ErrorCode::new("config", code),
        message: format!("failed to read rules file: {}", error.message),
        ..error
    }
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported rules format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
