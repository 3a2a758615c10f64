//! Input type definitions for manual page generation.
//!
//! This module defines the data model handed to the markup builder: raw
//! [`FlagDeclaration`]s as an upstream extractor reports them, the merged
//! [`Flag`] records the builder renders, and the [`ManualSource`] that ties a
//! program's description text to its flags. Everything here round-trips
//! through JSON and YAML.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Back-quoted parameter name inside a usage string (e.g. ``"read from `file`"``).
static BACKQUOTED_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("static regex must compile"));

/// Value kind of a declared flag.
///
/// Non-boolean kinds carry a default parameter name that is shown in the
/// manual when the usage text does not name one explicitly.
///
/// # Examples
///
/// ```
/// use mango_core::FlagKind;
///
/// assert_eq!(FlagKind::default(), FlagKind::Bool);
/// assert_eq!(FlagKind::Duration.default_param(), Some("duration"));
/// assert_eq!(FlagKind::Bool.default_param(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// Switch without a value (the default).
    #[default]
    Bool,
    /// Time span such as `1m30s`.
    Duration,
    /// Floating point number.
    Float,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Arbitrary string.
    String,
}

impl FlagKind {
    /// Parameter name used when the usage text has no back-quoted word.
    pub fn default_param(self) -> Option<&'static str> {
        match self {
            FlagKind::Bool => None,
            FlagKind::Duration => Some("duration"),
            FlagKind::Float => Some("float"),
            FlagKind::Int => Some("int"),
            FlagKind::Uint => Some("uint"),
            FlagKind::String => Some("string"),
        }
    }
}

/// A single flag declaration as found in source code.
///
/// Several declarations may bind the same `variable` (e.g. `-v` and
/// `-verbose`); [`collect_flags`](crate::collect_flags) folds those into one
/// [`Flag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FlagDeclaration {
    /// Variable the flag is bound to, when the declaration names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    /// Flag name without leading dashes.
    pub name: String,
    /// Declared value kind.
    #[serde(default)]
    pub kind: FlagKind,
    /// Usage string passed to the declaration.
    #[serde(default)]
    pub usage: String,
    /// Comment directly above the declaration.
    #[serde(default)]
    pub doc: String,
}

impl FlagDeclaration {
    /// Creates a declaration with the given name and kind.
    pub fn new(name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Sets the bound variable.
    pub fn bound_to(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Sets the usage string.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the doc comment.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Resolves this declaration into a [`Flag`].
    ///
    /// A back-quoted word in the usage text becomes the parameter name and
    /// the back-quotes are stripped from the usage. Otherwise the kind's
    /// default parameter name is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use mango_core::{FlagDeclaration, FlagKind};
    ///
    /// let flag = FlagDeclaration::new("out", FlagKind::String)
    ///     .with_usage("write output to `path`")
    ///     .resolve();
    /// assert_eq!(flag.param, "path");
    /// assert_eq!(flag.usage, "write output to path");
    ///
    /// let flag = FlagDeclaration::new("timeout", FlagKind::Duration).resolve();
    /// assert_eq!(flag.param, "duration");
    /// ```
    pub fn resolve(&self) -> Flag {
        let (usage, param) = match BACKQUOTED_PARAM.captures(&self.usage) {
            Some(caps) => (self.usage.replace('`', ""), caps[1].to_string()),
            None => (
                self.usage.clone(),
                self.kind.default_param().unwrap_or_default().to_string(),
            ),
        };

        Flag {
            name: self.name.clone(),
            short: String::new(),
            usage,
            doc: self.doc.clone(),
            param,
        }
    }
}

/// A command-line flag ready to be rendered.
///
/// `short` is empty unless two declarations were merged, in which case it
/// holds the shorter alias.
///
/// # Examples
///
/// ```
/// use mango_core::Flag;
///
/// let flag = Flag::new("output")
///     .with_short("o")
///     .with_usage("Output file")
///     .with_param("path");
/// assert_eq!(flag.description(), "Output file");
/// assert!(flag.has_short());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Flag {
    /// Long (canonical) name without leading dashes.
    pub name: String,
    /// Shorter alias, empty when there is none.
    #[serde(default)]
    pub short: String,
    /// Usage string from the declaration.
    #[serde(default)]
    pub usage: String,
    /// Doc comment from the declaration.
    #[serde(default)]
    pub doc: String,
    /// Parameter name shown after the flag, empty for switches.
    #[serde(default)]
    pub param: String,
}

impl Flag {
    /// Creates a flag with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the short alias.
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Sets the usage text.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the doc text.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Sets the parameter name.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// Returns `true` when the flag has a short alias.
    pub fn has_short(&self) -> bool {
        !self.short.is_empty()
    }

    /// Text describing the flag: the doc comment when present, else the usage.
    pub fn description(&self) -> &str {
        if self.doc.trim().is_empty() {
            &self.usage
        } else {
            &self.doc
        }
    }
}

/// Everything needed to build one manual page.
///
/// # Examples
///
/// ```
/// use mango_core::{Flag, ManualSource};
///
/// let source = ManualSource::new("frob", "frob - frobnicate files")
///     .with_flag(Flag::new("verbose").with_usage("Talk more"));
/// assert_eq!(source.flags.len(), 1);
/// assert!(source.date.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ManualSource {
    /// Program name, used for the title line and synopsis.
    pub name: String,
    /// Doc comment describing the program, in markup.
    #[serde(default)]
    pub description: String,
    /// Date printed in the title line; builders fall back to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Flags in declaration order.
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl ManualSource {
    /// Creates a source without flags.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            date: None,
            flags: Vec::new(),
        }
    }

    /// Creates a source from raw declarations, merging aliases.
    pub fn from_declarations(
        name: impl Into<String>,
        description: impl Into<String>,
        declarations: &[FlagDeclaration],
    ) -> Self {
        Self {
            flags: crate::collect_flags(declarations),
            ..Self::new(name, description)
        }
    }

    /// Appends a flag.
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Sets the date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_backquotes_and_uses_param() {
        let flag = FlagDeclaration::new("config", FlagKind::String)
            .with_usage("load settings from `file` before starting")
            .resolve();
        assert_eq!(flag.param, "file");
        assert_eq!(flag.usage, "load settings from file before starting");
        assert!(flag.short.is_empty());
    }

    #[test]
    fn test_resolve_bool_has_no_param() {
        let flag = FlagDeclaration::new("quiet", FlagKind::Bool)
            .with_usage("say nothing")
            .resolve();
        assert_eq!(flag.param, "");
    }

    #[test]
    fn test_description_prefers_doc() {
        let flag = Flag::new("x").with_usage("usage").with_doc("doc text");
        assert_eq!(flag.description(), "doc text");

        let flag = Flag::new("x").with_usage("usage").with_doc("  \n");
        assert_eq!(flag.description(), "usage");
    }

    #[test]
    fn test_manual_source_yaml_round_trip() {
        let yaml = r#"
name: frob
description: |
  frob - frobnicate things
date: 2024-03-01
flags:
  - name: verbose
    short: v
    usage: Talk more
"#;
        let source: ManualSource = serde_yaml::from_str(yaml).expect("yaml should parse");
        assert_eq!(source.name, "frob");
        assert_eq!(source.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(source.flags[0].short, "v");
        assert_eq!(source.flags[0].param, "");

        let json = serde_json::to_string(&source).expect("serialize");
        let back: ManualSource = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, source);
    }

    #[test]
    fn test_flag_kind_serde_is_lowercase() {
        let decl: FlagDeclaration =
            serde_json::from_str(r#"{"name":"n","kind":"uint"}"#).expect("parse");
        assert_eq!(decl.kind, FlagKind::Uint);
    }
}
