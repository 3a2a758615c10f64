//! Error types for building manual pages.

use mango_core::ValidationError;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors from building one manual page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The program description could not be parsed.
    #[error("failed to parse description: {0}")]
    Description(#[source] ParseError),

    /// A flag description could not be parsed.
    #[error("failed to parse description of flag -{flag}: {source}")]
    Flag { flag: String, source: ParseError },

    /// The source failed validation.
    #[error("invalid manual source: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

impl BuildError {
    /// Fatal errors abort a whole batch; the others only skip one page.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BuildError::Flag { .. })
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from loading a [`BuildConfig`](crate::BuildConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
