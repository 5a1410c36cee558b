//! Environment variable parsing.
//!
//! Env values are strict: a variable that is set must parse, otherwise
//! loading fails instead of silently falling back to the table value.

use field_rules_domain::VerdictPolicy;
use field_rules_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: verdict policy override.
pub const ENV_VERDICT_POLICY: &str = "FIELD_RULES_VERDICT_POLICY";

/// Parsed env overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RulesEnv {
    /// Verdict policy override.
    pub verdict_policy: Option<VerdictPolicy>,
}

impl RulesEnv {
    /// Parse overrides from an explicit map (tests, scoped env snapshots).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let verdict_policy = match map.get(ENV_VERDICT_POLICY).map(|value| value.trim()) {
            None => None,
            Some("") => {
                return Err(EnvParseError::EmptyValue {
                    var: ENV_VERDICT_POLICY,
                });
            },
            Some(value) => Some(value.parse::<VerdictPolicy>().map_err(|_| {
                EnvParseError::InvalidEnum {
                    var: ENV_VERDICT_POLICY,
                    value: value.to_owned(),
                }
            })?),
        };

        Ok(Self { verdict_policy })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_VERDICT_POLICY] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_owned(), value);
            }
        }
        Self::from_map(&map)
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an unrecognized value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, value } => {
                write!(formatter, "{var} has unsupported value `{value}`")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(ErrorCode::new("config", "invalid_env"), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}
