//! Input model for manual page generation.
//!
//! This crate defines the records the markup builder consumes:
//!
//! - [`FlagDeclaration`]: one flag declaration as an extractor found it
//!   (name, kind, usage string, doc comment, bound variable).
//! - [`Flag`]: a merged flag with long name, short alias, parameter name and
//!   description text.
//! - [`ManualSource`]: a program name, its markup description and its flags.
//!
//! Merging ([`collect_flags`]) folds declarations bound to the same variable
//! into one flag. Validation ([`validate_source`]) catches empty names and
//! duplicate flags.
//!
//! # Example
//!
//! ```
//! use mango_core::*;
//!
//! let decls = vec![
//!     FlagDeclaration::new("baz", FlagKind::String)
//!         .bound_to("optBaz")
//!         .with_usage("Two calls, but one entry in the manual."),
//!     FlagDeclaration::new("b", FlagKind::String).bound_to("optBaz"),
//! ];
//! let source = ManualSource::from_declarations("example", "example - demo", &decls);
//!
//! assert_eq!(source.flags.len(), 1);
//! assert_eq!(source.flags[0].short, "b");
//! assert!(validate_source(&source).is_empty());
//! ```

mod merge;
mod types;
mod validate;

pub use merge::collect_flags;
pub use types::*;
pub use validate::{ValidationError, validate_source};
