//! # Design
//!
//! - Constant error messages; the offending field travels as structured context.
//! - Values are captured as strings so secrets can be omitted at the call site.

use thiserror::Error;

/// Result alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while validating a [`crate::SyncConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A field held a value that violates a configuration invariant.
    #[error("invalid configuration field")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when it is safe to display.
        value: Option<String>,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        field: &'static str,
        reason: &'static str,
        value: Option<String>,
    ) -> Self {
        Self::InvalidField {
            field,
            reason,
            value,
        }
    }

    /// Human-readable description including the field and reason.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::InvalidField {
                field,
                reason,
                value: Some(value),
            } => format!("{field} {reason} (got '{value}')"),
            Self::InvalidField {
                field,
                reason,
                value: None,
            } => format!("{field} {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_includes_value_when_present() {
        let err = ConfigError::invalid("batch_size", "must be greater than zero", Some("0".into()));
        assert_eq!(err.describe(), "batch_size must be greater than zero (got '0')");

        let err = ConfigError::invalid("password", "must not be empty", None);
        assert_eq!(err.describe(), "password must not be empty");
    }
}
