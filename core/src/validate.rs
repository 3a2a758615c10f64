//! Manual source validation.
//!
//! Catches inputs that would produce a broken manual page: an empty program
//! name or one that is not a single path component, unnamed or malformed
//! flags, and two flags answering to the same name.
//!
//! # Examples
//!
//! ```
//! use mango_core::*;
//!
//! let source = ManualSource::new("frob", "").with_flag(Flag::new("verbose").with_short("v"));
//! assert!(validate_source(&source).is_empty());
//!
//! // Invalid: flag names are stored without dashes
//! let bad = ManualSource::new("frob", "").with_flag(Flag::new("--verbose"));
//! assert!(!validate_source(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Flag, ManualSource};

/// Manual source validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Program name is empty or whitespace-only.
    #[error("program name cannot be empty")]
    EmptyProgramName,
    /// Program name cannot serve as a file name (e.g. `"../frob"`).
    #[error("invalid program name: {0}")]
    InvalidProgramName(String),
    /// A flag has an empty name.
    #[error("flag name cannot be empty")]
    EmptyFlagName,
    /// A flag name carries dashes or whitespace (e.g. `"--verbose"`).
    #[error("invalid flag name: {0}")]
    InvalidFlagName(String),
    /// Two flags in the same document share a name or alias.
    #[error("duplicate flag: {0}")]
    DuplicateFlag(String),
}

/// Validates a manual source.
///
/// Returns every problem found; an empty vector means the source is fine.
pub fn validate_source(source: &ManualSource) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if source.name.trim().is_empty() {
        errors.push(ValidationError::EmptyProgramName);
    } else if !is_valid_program_name(&source.name) {
        errors.push(ValidationError::InvalidProgramName(source.name.clone()));
    }

    errors.extend(validate_flags(&source.flags));
    errors
}

fn validate_flags(flags: &[Flag]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for flag in flags {
        if flag.name.is_empty() {
            errors.push(ValidationError::EmptyFlagName);
            continue;
        }

        for name in [flag.name.as_str(), flag.short.as_str()] {
            if name.is_empty() {
                continue;
            }
            if !is_valid_flag_name(name) {
                errors.push(ValidationError::InvalidFlagName(name.to_string()));
                continue;
            }
            if !seen.insert(name) {
                errors.push(ValidationError::DuplicateFlag(name.to_string()));
            }
        }
    }

    errors
}

/// The page is written to `<name>.<section>`, so the name must stay a
/// single path component.
fn is_valid_program_name(name: &str) -> bool {
    !name.contains(['/', '\\', '\0']) && name != "." && name != ".."
}

fn is_valid_flag_name(name: &str) -> bool {
    !name.starts_with('-') && !name.chars().any(char::is_whitespace)
}
