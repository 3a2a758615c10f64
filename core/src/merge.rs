//! Flag alias merging.
//!
//! Source code frequently declares the same option twice, once with a short
//! and once with a long name, both bound to one variable. [`collect_flags`]
//! folds such declarations into a single [`Flag`] whose `short` field holds
//! the shorter alias.
//!
//! # Example
//!
//! ```
//! use mango_core::*;
//!
//! let decls = vec![
//!     FlagDeclaration::new("f", FlagKind::Bool).bound_to("force"),
//!     FlagDeclaration::new("foo", FlagKind::Bool).bound_to("force"),
//! ];
//! let flags = collect_flags(&decls);
//! assert_eq!(flags.len(), 1);
//! assert_eq!(flags[0].name, "foo");
//! assert_eq!(flags[0].short, "f");
//! ```

use std::collections::HashMap;

use crate::{Flag, FlagDeclaration};

impl Flag {
    /// Merges an alias of the same option into this flag.
    ///
    /// The longer name wins `name`, the shorter one becomes `short`. On equal
    /// lengths `other` becomes the short alias. Empty `doc`, `param` and
    /// `usage` fields are filled from `other`.
    pub fn merge(&mut self, other: &Flag) {
        if self.name.len() < other.name.len() {
            self.short = std::mem::replace(&mut self.name, other.name.clone());
        } else {
            self.short = other.name.clone();
        }

        fill_if_empty(&mut self.doc, &other.doc);
        fill_if_empty(&mut self.param, &other.param);
        fill_if_empty(&mut self.usage, &other.usage);
    }
}

fn fill_if_empty(target: &mut String, value: &str) {
    if target.is_empty() {
        *target = value.to_string();
    }
}

/// Resolves declarations into flags, merging those bound to one variable.
///
/// Output order follows the first declaration of each flag. Declarations
/// without a variable are never merged.
pub fn collect_flags(declarations: &[FlagDeclaration]) -> Vec<Flag> {
    let mut flags: Vec<Flag> = Vec::with_capacity(declarations.len());
    let mut bound: HashMap<&str, usize> = HashMap::new();

    for decl in declarations {
        let flag = decl.resolve();
        match decl.variable.as_deref().filter(|v| !v.is_empty()) {
            Some(variable) => match bound.get(variable) {
                Some(&idx) => flags[idx].merge(&flag),
                None => {
                    bound.insert(variable, flags.len());
                    flags.push(flag);
                }
            },
            None => flags.push(flag),
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use crate::FlagKind;

    use super::*;

    #[test]
    fn test_merge_precedence_is_order_independent() {
        let long_first = vec![
            FlagDeclaration::new("foo", FlagKind::Bool).bound_to("v"),
            FlagDeclaration::new("f", FlagKind::Bool).bound_to("v"),
        ];
        let short_first = vec![
            FlagDeclaration::new("f", FlagKind::Bool).bound_to("v"),
            FlagDeclaration::new("foo", FlagKind::Bool).bound_to("v"),
        ];

        for decls in [long_first, short_first] {
            let flags = collect_flags(&decls);
            assert_eq!(flags.len(), 1);
            assert_eq!(flags[0].name, "foo");
            assert_eq!(flags[0].short, "f");
        }
    }

    #[test]
    fn test_merge_fills_missing_fields() {
        let decls = vec![
            FlagDeclaration::new("b", FlagKind::String).bound_to("baz"),
            FlagDeclaration::new("baz", FlagKind::String)
                .bound_to("baz")
                .with_usage("two calls, one entry")
                .with_doc("Documented once."),
        ];
        let flags = collect_flags(&decls);
        assert_eq!(flags.len(), 1);
        let flag = &flags[0];
        assert_eq!(flag.name, "baz");
        assert_eq!(flag.short, "b");
        assert_eq!(flag.usage, "two calls, one entry");
        assert_eq!(flag.doc, "Documented once.");
        assert_eq!(flag.param, "string");
    }

    #[test]
    fn test_unbound_declarations_stay_separate() {
        let decls = vec![
            FlagDeclaration::new("a", FlagKind::Bool),
            FlagDeclaration::new("a", FlagKind::Bool),
            FlagDeclaration::new("c", FlagKind::Bool).bound_to(""),
        ];
        let flags = collect_flags(&decls);
        assert_eq!(flags.len(), 3);
        assert!(flags.iter().all(|f| f.short.is_empty()));
    }

    #[test]
    fn test_output_keeps_first_seen_order() {
        let decls = vec![
            FlagDeclaration::new("x", FlagKind::Bool).bound_to("x"),
            FlagDeclaration::new("yes", FlagKind::Bool),
            FlagDeclaration::new("xray", FlagKind::Bool).bound_to("x"),
        ];
        let names: Vec<_> = collect_flags(&decls)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["xray", "yes"]);
    }
}
