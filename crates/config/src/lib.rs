//! # field-rules-config
//!
//! Declarative rule tables (JSON/TOML), env overrides, and the loader that
//! turns them into a ready-to-use registry. This crate depends on `domain`
//! and `shared` only.

/// Environment variable parsing.
pub mod env;
/// Rule table loading helpers (file + env).
pub mod load;
/// Rule table schema types.
pub mod table;

pub use env::{ENV_VERDICT_POLICY, EnvParseError, RulesEnv};
pub use load::{
    EffectiveRules, load_effective_rules, load_effective_rules_std_env,
    load_rule_table_from_path, parse_rule_table_json, parse_rule_table_toml, to_pretty_json,
};
pub use table::{CURRENT_RULE_TABLE_VERSION, FieldRuleSpec, RuleTable, SchemaRules};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
