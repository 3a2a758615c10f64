//! Assembles one manual page from a [`ManualSource`].
//!
//! The page is built in four steps:
//!
//! 1. The description is read; everything before its first heading becomes
//!    the NAME section.
//! 2. A SYNOPSIS section is synthesized from the program name.
//! 3. An OPTIONS section lists every flag with its parsed description.
//! 4. The description's own sections follow in source order.
//!
//! The writer then puts the canonical sections first.

use chrono::Utc;
use mango_core::{ManualSource, validate_source};
use tracing::{debug, info};

use crate::config::{BuildConfig, ReaderKind};
use crate::error::BuildError;
use crate::node::{NodeId, NodeKind, Tree};
use crate::parser::{ParseError, Parser};
use crate::plain::read_plain;
use crate::render::{Renderer, render, render_children};
use crate::token::Tokenizer;
use crate::troff::TroffRenderer;
use crate::writer::ManWriter;

/// A parsed description plus the flag parts grafted onto it.
enum Document {
    Markup(Parser, NodeId),
    Plain(Tree, NodeId),
}

impl Document {
    fn read(kind: ReaderKind, text: &str) -> Result<Self, ParseError> {
        match kind {
            ReaderKind::Markup => {
                let tokens = Tokenizer::new().tokenize_str(text);
                let mut parser = Parser::new();
                let root = parser.parse(&tokens)?;
                Ok(Document::Markup(parser, root))
            }
            ReaderKind::Plain => {
                let mut tree = Tree::new();
                let root = read_plain(&mut tree, text);
                Ok(Document::Plain(tree, root))
            }
        }
    }

    /// Reads `text` into a new part under the root.
    fn graft(&mut self, text: &str) -> Result<NodeId, ParseError> {
        match self {
            Document::Markup(parser, _) => {
                let tokens = Tokenizer::new().tokenize_str(text);
                parser.parse_part(&tokens)
            }
            Document::Plain(tree, root) => {
                let part = read_plain(tree, text);
                tree.attach(*root, part);
                Ok(part)
            }
        }
    }

    fn tree(&self) -> &Tree {
        match self {
            Document::Markup(parser, _) => parser.tree(),
            Document::Plain(tree, _) => tree,
        }
    }

    fn root(&self) -> NodeId {
        match self {
            Document::Markup(_, root) | Document::Plain(_, root) => *root,
        }
    }
}

/// Builds troff manual pages.
///
/// Each call to [`ManualBuilder::build`] uses its own tokenizer, parser and
/// writer, so one builder can serve many threads.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mango_core::{Flag, ManualSource};
/// use mango_markup::ManualBuilder;
///
/// let source = ManualSource::new("frob", "frob - frobnicate files")
///     .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .with_flag(Flag::new("verbose").with_short("v").with_usage("Talk *more*"));
///
/// let page = ManualBuilder::default().build(&source).unwrap();
/// assert!(page.starts_with(".TH \"FROB\" 1 \"2024-03-01\" \"Frob\" \"Frob Manual\"\n"));
/// assert!(page.contains(".SH \"NAME\"\nfrob - frobnicate files\n"));
/// assert!(page.contains(".TP\n\\fB\\-v\\fR, \\fB\\-verbose\\fR\nTalk\n.B \"more\"\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualBuilder {
    config: BuildConfig,
}

impl ManualBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Builds the page for `source`.
    ///
    /// # Errors
    ///
    /// [`BuildError::Invalid`] when validation fails and
    /// [`BuildError::Description`] when the description cannot be parsed;
    /// both only concern this page. [`BuildError::Flag`] is fatal.
    pub fn build(&self, source: &ManualSource) -> Result<String, BuildError> {
        let problems = validate_source(source);
        if !problems.is_empty() {
            return Err(BuildError::Invalid(problems));
        }

        let date = source.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut writer = ManWriter::new(&source.name, &self.config.section)
            .with_date(date)
            .with_source(self.config.source.clone())
            .with_manual(self.config.manual.clone());

        let mut document =
            Document::read(self.config.reader, &source.description).map_err(BuildError::Description)?;

        // Flag parts are appended to the root later; only the description nodes
        // take part in steps 1 and 4.
        let nodes = document.tree().children(document.root()).to_vec();
        let first_section = nodes
            .iter()
            .position(|&id| document.tree().kind(id) == NodeKind::Section)
            .unwrap_or(nodes.len());
        let (intro, rest) = nodes.split_at(first_section);

        {
            let mut troff = TroffRenderer::new(&mut writer);
            troff.section("Name");
            for &id in intro {
                render(&mut troff, document.tree(), id);
            }

            troff.section("Synopsis");
            troff.text(&source.name);
            troff.text_underline("[options...]");
            troff.text_underline("[argument...]");
        }

        if !source.flags.is_empty() {
            TroffRenderer::new(&mut writer).section("Options");
        }
        for flag in &source.flags {
            let part = document
                .graft(flag.description())
                .map_err(|err| BuildError::Flag {
                    flag: flag.name.clone(),
                    source: err,
                })?;
            let mut troff = TroffRenderer::new(&mut writer);
            troff.flag_heading(&flag.name, &flag.short, &flag.param);
            render_children(&mut troff, document.tree(), part);
        }

        let mut troff = TroffRenderer::new(&mut writer);
        for &id in rest {
            if document.tree().kind(id) == NodeKind::Section {
                render(&mut troff, document.tree(), id);
            }
        }

        debug!(
            name = %source.name,
            flags = source.flags.len(),
            sections = rest.len(),
            "Rendered manual page"
        );
        let page = writer.finalize();
        info!(name = %source.name, section = %self.config.section, "Built manual page");
        Ok(page)
    }
}
