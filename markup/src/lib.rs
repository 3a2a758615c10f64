//! Doc comment markup to troff manual pages.
//!
//! The pipeline has four stages:
//!
//! - [`Tokenizer`] turns text lines into a flat [`Token`] stream (indents,
//!   list and block items, emphasis delimiters, headings).
//! - [`Parser`] builds an arena [`Tree`] of [`NodeKind`] nodes from the
//!   stream, tracking indentation and the current section.
//! - [`render`] walks the tree and drives a [`Renderer`]; [`TroffRenderer`]
//!   writes `man` macros into a [`ManWriter`].
//! - [`ManWriter`] buffers sections and emits them in manual order.
//!
//! [`ManualBuilder`] runs the whole pipeline for one
//! [`ManualSource`](mango_core::ManualSource); [`build_all`] does so for many
//! sources in parallel.
//!
//! # Example
//!
//! ```
//! use mango_markup::{ManWriter, Parser, Tokenizer, TroffRenderer, render};
//!
//! let tokens = Tokenizer::new().tokenize_str("Frobnicates *all* the things.\n\nBugs:\n\nNone.");
//! let mut parser = Parser::new();
//! let root = parser.parse(&tokens).unwrap();
//!
//! let mut writer = ManWriter::new("frob", "1");
//! writer.activate("description");
//! render(&mut TroffRenderer::new(&mut writer), parser.tree(), root);
//! let page = writer.finalize();
//!
//! assert!(page.contains(".B \"all\""));
//! assert!(page.contains(".SH \"BUGS\"\nNone.\n"));
//! ```

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod node;
pub mod parser;
pub mod plain;
pub mod render;
pub mod token;
pub mod troff;
pub mod writer;

pub use batch::{BuildOutcome, build_all};
pub use builder::ManualBuilder;
pub use config::{BuildConfig, ReaderKind};
pub use error::{BuildError, ConfigError};
pub use node::{Node, NodeId, NodeKind, Outline, Tree};
pub use parser::{ParseError, Parser, TokenGroup};
pub use plain::read_plain;
pub use render::{Renderer, render, render_children};
pub use token::{Token, TokenKind, Tokenizer};
pub use troff::TroffRenderer;
pub use writer::{CANONICAL_SECTIONS, ManWriter};
