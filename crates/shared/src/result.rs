//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for attaching diagnostics to envelope results.
pub trait ResultExt<T> {
    /// Attach a metadata entry to the error, leaving the success untouched.
    fn with_metadata(self, key: &str, value: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ErrorEnvelope>,
{
    fn with_metadata(self, key: &str, value: impl Into<String>) -> Result<T> {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn with_metadata_leaves_ok_untouched() {
        let value: Result<i32> = Ok(1);
        assert!(matches!(value.with_metadata("path", "rules.toml"), Ok(1)));
    }

    #[test]
    fn with_metadata_annotates_errors() -> std::result::Result<(), &'static str> {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad input");
        let value: Result<i32> = Err(error);
        let annotated = value.with_metadata("path", "rules.toml");

        let Err(error) = annotated else {
            return Err("expected an error");
        };
        assert_eq!(
            error.metadata.get("path").map(String::as_str),
            Some("rules.toml")
        );
        Ok(())
    }

    #[test]
    fn io_errors_convert_through_with_metadata() {
        let value: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let annotated = value.with_metadata("path", "rules.json");
        assert!(matches!(annotated, Err(ref error) if error.code == ErrorCode::not_found()));
    }
}
