//! # field-rules-shared
//!
//! Shared result types and error handling for the field-rules workspace.
//!
//! - [`ErrorEnvelope`] - structured, serializable error shared by every crate
//! - [`Result`] - workspace result alias defaulting to [`ErrorEnvelope`]
//!
//! This crate only depends on external crates.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{
    ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, UnexpectedError,
    normalize_unexpected_error,
};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
