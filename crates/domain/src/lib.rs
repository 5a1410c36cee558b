//! # field-rules-domain
//!
//! Rule registry and validator for declaratively validated records.
//!
//! - **Identity** - `SchemaId`, `FieldName`
//! - **Values** - `FieldValue` and its truthiness
//! - **Rules** - `RuleKind` (`required`, `positive`)
//! - **Registry** - `RuleRegistry`, `RegistryBuilder`
//! - **Validation** - `validate`, `Validator`, `VerdictPolicy`, `ValidationReport`
//! - **Records** - `ValidationSubject`, `DynamicSubject`, `Course`
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate
//! - No I/O; the registry is an owned value passed to the validator

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use field_rules_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod course;
pub mod error;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod subject;
pub mod validator;
pub mod value;

pub use course::Course;
pub use error::DomainError;
pub use registry::{FieldRules, RegistryBuilder, RuleRegistry, SchemaBuilder};
pub use rules::RuleKind;
pub use schema::{FieldName, SchemaId};
pub use subject::{DynamicSubject, ValidationSubject};
pub use validator::{RuleFailure, ValidationReport, Validator, VerdictPolicy, validate};
pub use value::FieldValue;

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
