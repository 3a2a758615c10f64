//! Section-buffering manual page writer.
//!
//! Renderers write into whichever section is active. Sections are collected
//! separately and put in manual order when the page is finalized: the
//! canonical sections first, then everything else in the order it was first
//! activated.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::troff::quote;

/// Sections that always lead the page, in this order, when present.
pub const CANONICAL_SECTIONS: [&str; 5] =
    ["name", "synopsis", "description", "options", "exit status"];

/// Accumulates section bodies and assembles the final page.
///
/// # Examples
///
/// ```
/// use std::fmt::Write;
///
/// use chrono::NaiveDate;
/// use mango_markup::ManWriter;
///
/// let mut writer = ManWriter::new("frob", "1")
///     .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// writer.activate("Description");
/// writeln!(writer, "Frobnicates.").unwrap();
/// writer.activate("Name");
/// writeln!(writer, "frob").unwrap();
///
/// let page = writer.finalize();
/// assert!(page.starts_with(".TH \"FROB\" 1 \"2024-03-01\""));
/// assert!(page.find("frob\n").unwrap() < page.find("Frobnicates.").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ManWriter {
    name: String,
    section: String,
    date: NaiveDate,
    source: Option<String>,
    manual: Option<String>,
    sections: HashMap<String, String>,
    order: Vec<String>,
    active: Option<String>,
    buffer: String,
}

impl ManWriter {
    /// Creates a writer for program `name` in manual `section`, dated today.
    pub fn new(name: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            date: chrono::Utc::now().date_naive(),
            source: None,
            manual: None,
            sections: HashMap::new(),
            order: Vec::new(),
            active: None,
            buffer: String::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Overrides the source field of the title line (default: the title-cased name).
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Overrides the manual field of the title line (default: `"<Source> Manual"`).
    pub fn with_manual(mut self, manual: Option<String>) -> Self {
        self.manual = manual;
        self
    }

    /// Name of the section currently written to, lowercased.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Starts writing to section `name` (case-insensitive).
    ///
    /// Re-activating a name replaces its earlier body but keeps its position.
    pub fn activate(&mut self, name: &str) {
        self.flush();
        let name = name.to_lowercase();
        self.order.push(name.clone());
        self.active = Some(name);
    }

    /// Appends `line` and a newline to the active section.
    pub fn line(&mut self, line: &str) {
        self.append(line);
        self.append("\n");
    }

    fn append(&mut self, text: &str) {
        assert!(
            self.active.is_some(),
            "write to manual page without an active section"
        );
        self.buffer.push_str(text);
    }

    fn flush(&mut self) {
        let body = std::mem::take(&mut self.buffer);
        if let Some(name) = self.active.take() {
            if !body.is_empty() {
                self.sections.insert(name, body);
            }
        }
    }

    /// Assembles the page: title line, canonical sections, then the rest.
    pub fn finalize(mut self) -> String {
        self.flush();

        let mut page = self.title_line();
        for name in CANONICAL_SECTIONS {
            if let Some(body) = self.sections.remove(name) {
                page.push_str(&body);
            }
        }
        for name in &self.order {
            if let Some(body) = self.sections.remove(name) {
                page.push_str(&body);
            }
        }

        debug!(name = %self.name, bytes = page.len(), "Finalized manual page");
        page
    }

    fn title_line(&self) -> String {
        let source = self
            .source
            .clone()
            .unwrap_or_else(|| title_case(&self.name));
        let manual = self
            .manual
            .clone()
            .unwrap_or_else(|| format!("{source} Manual"));
        format!(
            ".TH {} {} {} {} {}\n",
            quote(&self.name.to_uppercase()),
            self.section,
            quote(&self.date.format("%Y-%m-%d").to_string()),
            quote(&source),
            quote(&manual),
        )
    }
}

impl fmt::Write for ManWriter {
    /// # Panics
    ///
    /// Panics when no section is active.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
