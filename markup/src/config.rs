//! Build configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! section: "8"
//! manual: System Manager's Manual
//! source: frob 2.1
//! reader: plain
//! ```
//!
//! Every key is optional.

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How program and flag descriptions are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderKind {
    /// Indentation, lists, headings and emphasis are interpreted.
    #[default]
    Markup,
    /// Lines are copied as plain paragraphs.
    Plain,
}

/// Settings shared by every page of a build.
///
/// # Examples
///
/// ```
/// # use mango_markup::{BuildConfig, ReaderKind};
/// let config: BuildConfig = serde_yaml::from_str("section: \"8\"").unwrap();
/// assert_eq!(config.section, "8");
/// assert_eq!(config.reader, ReaderKind::Markup);
/// assert!(config.manual.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Manual section number.
    pub section: String,
    /// Manual title, the fifth `.TH` field.
    pub manual: Option<String>,
    /// Source, the fourth `.TH` field.
    pub source: Option<String>,
    pub reader: ReaderKind,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            section: "1".to_string(),
            manual: None,
            source: None,
            reader: ReaderKind::Markup,
        }
    }
}

impl BuildConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}
