//! Indentation-aware parser building a [`Tree`] from a token stream.
//!
//! The stream is split into one [`TokenGroup`] per physical line. Each line
//! first adjusts the insertion point (blank lines, indentation changes, block
//! and list items) and then appends its inline content.
//!
//! Headings become `Section` nodes attached to the document root; the lines
//! after a heading are its children until the next heading. Closing "all
//! groups" (blank lines) returns to the enclosing section, or to the root
//! when no section is open.
//!
//! Parts parsed with [`Parser::parse_part`] never hold sections: a heading
//! there is kept as plain text in place.

use thiserror::Error;
use tracing::debug;

use crate::node::{NodeId, NodeKind, Tree};
use crate::token::{Token, TokenKind, tokens_are};

/// Structural defects of a token stream that the tokenizer never produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("token stream must start with an end-of-line sentinel")]
    MissingLeadingEndOfLine,
    #[error("token stream must end with an end-of-line token")]
    MissingTrailingEndOfLine,
}

/// Tokens of one physical line, minus its leading indents.
#[derive(Debug, Clone)]
pub struct TokenGroup<'a> {
    tokens: &'a [Token],
    level: usize,
    pos: usize,
}

impl<'a> TokenGroup<'a> {
    pub fn new(line: &'a [Token]) -> Self {
        let level = line
            .iter()
            .take_while(|t| t.is(TokenKind::Indent))
            .count();
        Self {
            tokens: &line[level..],
            level,
            pos: 0,
        }
    }

    /// Number of leading indents.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens not consumed yet.
    pub fn rest(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    pub fn starts_with(&self, kinds: &[TokenKind]) -> bool {
        tokens_are(self.rest(), kinds)
    }

    /// Consumes the next token only if it has the given kind.
    pub fn next_if(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.starts_with(&[kind]) {
            self.next()
        } else {
            None
        }
    }
}

impl<'a> Iterator for TokenGroup<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }
}

/// Splits a stream at its end-of-line tokens.
///
/// The piece before the leading sentinel is kept (always empty), so the
/// first real line has index 1.
fn split_lines(tokens: &[Token]) -> Result<Vec<&[Token]>, ParseError> {
    let Some((last, body)) = tokens.split_last() else {
        return Ok(Vec::new());
    };
    if !tokens[0].is(TokenKind::EndOfLine) {
        return Err(ParseError::MissingLeadingEndOfLine);
    }
    if !last.is(TokenKind::EndOfLine) {
        return Err(ParseError::MissingTrailingEndOfLine);
    }
    Ok(body.split(|t| t.is(TokenKind::EndOfLine)).collect())
}

/// Builds document trees from token streams.
///
/// # Examples
///
/// ```
/// use mango_markup::{NodeKind, Parser, Tokenizer};
///
/// let tokens = Tokenizer::new().tokenize_str("1) foo\n2) bar");
/// let mut parser = Parser::new();
/// let root = parser.parse(&tokens).unwrap();
///
/// let tree = parser.tree();
/// let list = tree.children(root)[0];
/// assert_eq!(tree.kind(list), NodeKind::List);
/// assert_eq!(tree.children(list).len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    tree: Tree,
    root: Option<NodeId>,
    /// Root of the subtree being parsed (the document root or a part).
    top: Option<NodeId>,
    cursor: Option<NodeId>,
    pending_space: bool,
    in_part: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Root of the last document started with [`Parser::parse`].
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Parses a stream into a fresh tree and returns its root `Group`.
    pub fn parse(&mut self, tokens: &[Token]) -> Result<NodeId, ParseError> {
        let lines = split_lines(tokens)?;
        self.tree = Tree::new();
        let root = self.tree.alloc(NodeKind::Group, "");
        self.root = Some(root);
        self.in_part = false;
        self.run(root, &lines);
        self.cursor = Some(root);
        debug!(nodes = self.tree.len(), lines = lines.len(), "Parsed document");
        Ok(root)
    }

    /// Parses a stream into a new `Group` grafted onto the current root.
    ///
    /// Previously parsed nodes are left untouched and headings in `tokens`
    /// become `Text`. Without a current root this behaves like
    /// [`Parser::parse`].
    pub fn parse_part(&mut self, tokens: &[Token]) -> Result<NodeId, ParseError> {
        let Some(root) = self.root else {
            return self.parse(tokens);
        };
        let lines = split_lines(tokens)?;
        let part = self.tree.alloc(NodeKind::Group, "");
        self.in_part = true;
        self.run(part, &lines);
        self.in_part = false;
        self.tree.attach(root, part);
        self.cursor = Some(root);
        debug!(nodes = self.tree.len(), lines = lines.len(), "Parsed document part");
        Ok(part)
    }

    fn run(&mut self, top: NodeId, lines: &[&[Token]]) {
        self.top = Some(top);
        self.cursor = Some(top);
        self.pending_space = false;

        let mut previous_level = 0;
        for (idx, line) in lines.iter().enumerate() {
            let mut group = TokenGroup::new(line);

            if group.is_empty() && idx > 0 {
                self.close_all_groups();
                self.add_node(NodeKind::Break, "");
                previous_level = 0;
                continue;
            }

            // A block only continues on block lines at the same depth.
            let level = group.level();
            if level != previous_level || !group.starts_with(&[TokenKind::BlockItem]) {
                self.leave_block();
            }
            for _ in previous_level..level {
                self.open_group();
            }
            for _ in level..previous_level {
                self.close_group();
            }

            if let Some(item) = group.next_if(TokenKind::BlockItem) {
                if self.tree.kind(self.cursor()) != NodeKind::Block {
                    self.cursor = Some(self.add_node(NodeKind::Block, ""));
                }
                self.add_node(NodeKind::Text, &item.text);
            }

            if let Some(item) = group.next_if(TokenKind::ListItem) {
                self.enter_list_item(&item.text);
            }

            // Lines wrapped in the source are joined with a single space.
            self.pending_space = self
                .tree
                .last_child(self.cursor())
                .is_some_and(|last| self.tree.kind(last).is_text());

            while let Some(token) = group.next() {
                match token.kind {
                    TokenKind::Section if self.in_part => {
                        self.add_node(NodeKind::Text, &token.text);
                    }
                    TokenKind::Section => {
                        self.cursor = Some(self.top());
                        let section = self.add_node(NodeKind::Section, &token.text);
                        self.cursor = Some(section);
                    }
                    TokenKind::Text => {
                        self.add_node(NodeKind::Text, &token.text);
                    }
                    TokenKind::Star => self.emphasis(&mut group, TokenKind::Star, NodeKind::TextBold),
                    TokenKind::Underline => {
                        self.emphasis(&mut group, TokenKind::Underline, NodeKind::TextUnderline)
                    }
                    _ => {}
                }
            }

            self.pending_space = false;
            previous_level = level;
        }
    }

    /// `delim Text delim` becomes one emphasis node; a lone delimiter is dropped.
    fn emphasis(&mut self, group: &mut TokenGroup<'_>, delim: TokenKind, kind: NodeKind) {
        if !group.starts_with(&[TokenKind::Text, delim]) {
            return;
        }
        if let Some(text) = group.next() {
            group.next();
            self.add_node(kind, &text.text);
        }
    }

    fn cursor(&self) -> NodeId {
        self.cursor.expect("parser cursor is set while parsing")
    }

    fn top(&self) -> NodeId {
        self.top.expect("parser top is set while parsing")
    }

    fn add_node(&mut self, kind: NodeKind, text: &str) -> NodeId {
        let cursor = self.cursor();
        if std::mem::take(&mut self.pending_space) && kind.is_text() {
            let space = self.tree.alloc(NodeKind::Space, "");
            self.tree.attach(cursor, space);
        }
        let id = self.tree.alloc(kind, text);
        self.tree.attach(cursor, id);
        id
    }

    fn open_group(&mut self) {
        self.cursor = Some(self.add_node(NodeKind::Group, ""));
    }

    /// Climbs to the nearest enclosing `Group` and then to its parent.
    ///
    /// Never leaves a `Section` or the subtree being parsed.
    fn close_group(&mut self) {
        let mut node = self.cursor();
        while !matches!(self.tree.kind(node), NodeKind::Group | NodeKind::Section) {
            match self.tree.parent(node) {
                Some(parent) => node = parent,
                None => break,
            }
        }
        if self.tree.kind(node) == NodeKind::Group {
            node = self.tree.parent(node).unwrap_or(node);
        }
        self.cursor = Some(node);
    }

    /// Returns to the enclosing section, or to the top when there is none.
    fn close_all_groups(&mut self) {
        let top = self.top();
        let mut node = self.cursor();
        while node != top && self.tree.kind(node) != NodeKind::Section {
            match self.tree.parent(node) {
                Some(parent) => node = parent,
                None => break,
            }
        }
        self.cursor = Some(node);
    }

    fn leave_block(&mut self) {
        let cursor = self.cursor();
        if self.tree.kind(cursor) == NodeKind::Block {
            self.cursor = self.tree.parent(cursor).or(Some(cursor));
        }
    }

    fn enter_list_item(&mut self, label: &str) {
        let cursor = self.cursor();
        match self.tree.kind(cursor) {
            NodeKind::ListItem => {
                self.cursor = self.tree.parent(cursor);
            }
            NodeKind::List => {}
            _ => {
                self.cursor = Some(self.add_node(NodeKind::List, ""));
            }
        }
        self.cursor = Some(self.add_node(NodeKind::ListItem, label));
    }
}
