//! Line-oriented tokenizer for doc comment markup.
//!
//! Each physical line is scanned by a fixed sequence of sub-scanners:
//! section headings (recognized by looking back at the previous line),
//! indentation, block items, list items and finally inline emphasis
//! delimiters. The stream always starts with an [`TokenKind::EndOfLine`]
//! sentinel so the first line needs no special casing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Number of indent columns that make up one [`TokenKind::Indent`].
pub const INDENT_WIDTH: usize = 4;

static BLOCK_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*").expect("static regex must compile"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Za-z_]+|\*)\)\s*").expect("static regex must compile")
});
static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]*[ \t]*)+:$").expect("static regex must compile")
});
static SECTION_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-+|=+)$").expect("static regex must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfLine,
    Section,
    Text,
    Indent,
    BlockItem,
    ListItem,
    Underline,
    Star,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::EndOfLine => "EndOfLine",
            TokenKind::Section => "Section",
            TokenKind::Text => "Text",
            TokenKind::Indent => "Indent",
            TokenKind::BlockItem => "BlockItem",
            TokenKind::ListItem => "ListItem",
            TokenKind::Underline => "Underline",
            TokenKind::Star => "Star",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self::with_text(kind, "")
    }

    pub fn with_text(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token{{{}, {:?}}}", self.kind, self.text)
    }
}

/// Returns `true` if the leading tokens match `kinds` in order.
pub fn tokens_are(tokens: &[Token], kinds: &[TokenKind]) -> bool {
    kinds.len() <= tokens.len() && tokens.iter().zip(kinds).all(|(t, k)| t.is(*k))
}

/// Converts markup text into a flat token stream.
///
/// The tokenizer is total: every input, including the empty string, yields a
/// stream that ends in [`TokenKind::EndOfLine`].
///
/// # Examples
///
/// ```
/// use mango_markup::{TokenKind, Tokenizer};
///
/// let tokens = Tokenizer::new().tokenize_str("Title\n-----\n");
/// assert_eq!(tokens[1].kind, TokenKind::Section);
/// assert_eq!(tokens[1].text, "Title");
/// ```
#[derive(Debug, Default)]
pub struct Tokenizer {
    tokens: Vec<Token>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes a string split at `\n` (a trailing `\r` is dropped per line).
    pub fn tokenize_str(&mut self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return self.tokenize_lines::<&str>(&[]);
        }
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        self.tokenize_lines(&lines)
    }

    pub fn tokenize_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<Token> {
        self.tokens = vec![Token::new(TokenKind::EndOfLine)];
        for line in lines {
            self.scan_line(line.as_ref());
        }
        std::mem::take(&mut self.tokens)
    }

    fn push(&mut self, kind: TokenKind, text: &str) {
        self.tokens.push(Token::with_text(kind, text));
    }

    /// The last `n` tokens, or fewer when the stream is shorter.
    fn last_tokens(&self, n: usize) -> &[Token] {
        &self.tokens[self.tokens.len().saturating_sub(n)..]
    }

    /// Index of the heading candidate when the stream ends in `EOL Text EOL`.
    fn heading_candidate(&self) -> Option<usize> {
        let tail = self.last_tokens(3);
        if tail.len() == 3
            && tokens_are(
                tail,
                &[TokenKind::EndOfLine, TokenKind::Text, TokenKind::EndOfLine],
            )
        {
            Some(self.tokens.len() - 2)
        } else {
            None
        }
    }

    /// A line of text followed by a line of dashes or equal signs.
    ///
    /// ```text
    /// This Is A Title  or  This Is A Title
    /// ---------------      ===============
    /// ```
    fn scan_underlined_section(&mut self, line: &str) -> bool {
        if !SECTION_UNDERLINE.is_match(line) {
            return false;
        }
        let Some(idx) = self.heading_candidate() else {
            return false;
        };
        let heading = &mut self.tokens[idx];
        heading.kind = TokenKind::Section;
        heading.text = heading.text.trim().to_string();
        true
    }

    /// A line of capitalized words ending in a colon, followed by a blank line.
    ///
    /// ```text
    /// Return Codes:
    ///
    /// ```
    fn scan_label_section(&mut self, line: &str) -> bool {
        if !line.trim().is_empty() {
            return false;
        }
        let Some(idx) = self.heading_candidate() else {
            return false;
        };
        let heading = &mut self.tokens[idx];
        if !SECTION_LABEL.is_match(&heading.text) {
            return false;
        }
        heading.kind = TokenKind::Section;
        heading.text = heading.text.trim_end_matches(':').trim().to_string();
        true
    }

    /// Emits one indent per [`INDENT_WIDTH`] columns and returns the rest of
    /// the line along with the number of indents emitted.
    fn scan_indentation<'a>(&mut self, line: &'a str) -> (&'a str, usize) {
        let mut columns = 0;
        let mut indents = 0;
        let mut consumed = line.len();

        for (pos, ch) in line.char_indices() {
            match ch {
                ' ' => columns += 1,
                '\t' => columns += INDENT_WIDTH,
                _ => {
                    consumed = pos;
                    break;
                }
            }
            if columns >= INDENT_WIDTH {
                self.push(TokenKind::Indent, "");
                indents += 1;
                columns = 0;
            }
        }

        (&line[consumed..], indents)
    }

    /// Preformatted line: a `>` marker, or any line that was indented.
    fn scan_block_item(&mut self, rest: &str, indents: usize) -> bool {
        let payload = match BLOCK_ITEM.find(rest) {
            Some(m) => &rest[m.end()..],
            None if indents > 0 && !rest.is_empty() => rest,
            None => return false,
        };
        self.push(TokenKind::BlockItem, payload);
        true
    }

    fn scan_list_item<'a>(&mut self, rest: &'a str) -> &'a str {
        let Some(caps) = LIST_ITEM.captures(rest) else {
            return rest;
        };
        let total = caps.get(0).map_or(0, |m| m.end());
        self.push(TokenKind::ListItem, &caps[1]);
        &rest[total..]
    }

    fn scan_inline(&mut self, rest: &str) {
        let mut start = 0;
        for (pos, ch) in rest.char_indices() {
            let kind = match ch {
                '*' => TokenKind::Star,
                '_' => TokenKind::Underline,
                _ => continue,
            };
            if start < pos {
                self.push(TokenKind::Text, &rest[start..pos]);
            }
            self.push(kind, "");
            start = pos + ch.len_utf8();
        }
        if start < rest.len() {
            self.push(TokenKind::Text, &rest[start..]);
        }
    }

    fn scan_line(&mut self, line: &str) {
        // Heading lines are consumed whole, including their end of line.
        if self.scan_underlined_section(line) || self.scan_label_section(line) {
            return;
        }

        let (rest, indents) = self.scan_indentation(line);
        if !self.scan_block_item(rest, indents) {
            let rest = self.scan_list_item(rest);
            self.scan_inline(rest);
        }
        self.push(TokenKind::EndOfLine, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    use TokenKind::*;

    #[test]
    fn test_empty_input_is_single_sentinel() {
        let tokens = Tokenizer::new().tokenize_str("");
        assert_eq!(kinds(&tokens), vec![EndOfLine]);
    }

    #[test]
    fn test_stream_always_ends_in_end_of_line() {
        for input in ["", "\n", "abc", "*", "____", "  \t ", "Foo:", "x\n---", "> a\n1) b"] {
            let tokens = Tokenizer::new().tokenize_str(input);
            assert_eq!(tokens.last().map(|t| t.kind), Some(EndOfLine), "{input:?}");
            assert_eq!(tokens[0].kind, EndOfLine);
        }
    }

    #[test]
    fn test_plain_line() {
        let tokens = Tokenizer::new().tokenize_str("hello world");
        assert_eq!(kinds(&tokens), vec![EndOfLine, Text, EndOfLine]);
        assert_eq!(tokens[1].text, "hello world");
    }

    #[test]
    fn test_underlined_section() {
        let tokens = Tokenizer::new().tokenize_str("Title\n=====\nbody");
        assert_eq!(kinds(&tokens), vec![EndOfLine, Section, EndOfLine, Text, EndOfLine]);
        assert_eq!(tokens[1].text, "Title");
    }

    #[test]
    fn test_underline_requires_preceding_text_line() {
        let tokens = Tokenizer::new().tokenize_str("\n-----");
        assert!(tokens.iter().all(|t| t.kind != Section));
        assert_eq!(tokens[2].text, "-----");
    }

    #[test]
    fn test_label_section_strips_colon_and_blank() {
        let tokens = Tokenizer::new().tokenize_str("Return Codes:\n\nzero");
        assert_eq!(kinds(&tokens), vec![EndOfLine, Section, EndOfLine, Text, EndOfLine]);
        assert_eq!(tokens[1].text, "Return Codes");
    }

    #[test]
    fn test_label_needs_blank_line_after() {
        let tokens = Tokenizer::new().tokenize_str("Return Codes:\nzero");
        assert!(tokens.iter().all(|t| t.kind != Section));
    }

    #[test]
    fn test_label_needs_capitalized_words() {
        let tokens = Tokenizer::new().tokenize_str("return codes:\n\n");
        assert!(tokens.iter().all(|t| t.kind != Section));
    }

    #[test]
    fn test_indentation_counts_tabs_and_spaces() {
        let tokens = Tokenizer::new().tokenize_lines(&["\t  \t> x"]);
        let indents = tokens.iter().filter(|t| t.is(Indent)).count();
        assert_eq!(indents, 2);
        assert!(tokens.iter().any(|t| t.is(BlockItem) && t.text == "x"));
    }

    #[test]
    fn test_short_indent_emits_nothing() {
        let tokens = Tokenizer::new().tokenize_lines(&["  text"]);
        assert_eq!(kinds(&tokens), vec![EndOfLine, Text, EndOfLine]);
        assert_eq!(tokens[1].text, "text");
    }

    #[test]
    fn test_block_item_keeps_rest_verbatim() {
        let tokens = Tokenizer::new().tokenize_lines(&["> let *x* = 1;"]);
        assert_eq!(kinds(&tokens), vec![EndOfLine, BlockItem, EndOfLine]);
        assert_eq!(tokens[1].text, "let *x* = 1;");
    }

    #[test]
    fn test_indented_line_is_block_item() {
        let tokens = Tokenizer::new().tokenize_lines(&["    go build ./..."]);
        assert_eq!(kinds(&tokens), vec![EndOfLine, Indent, BlockItem, EndOfLine]);
        assert_eq!(tokens[2].text, "go build ./...");
    }

    #[test]
    fn test_list_items() {
        let tokens = Tokenizer::new().tokenize_lines(&["1) first", "*) bullet"]);
        assert_eq!(
            kinds(&tokens),
            vec![EndOfLine, ListItem, Text, EndOfLine, ListItem, Text, EndOfLine]
        );
        assert_eq!(tokens[1].text, "1");
        assert_eq!(tokens[2].text, "first");
        assert_eq!(tokens[4].text, "*");
    }

    #[test]
    fn test_inline_emphasis_delimiters() {
        let tokens = Tokenizer::new().tokenize_lines(&["a *b* _c_"]);
        assert_eq!(
            kinds(&tokens),
            vec![EndOfLine, Text, Star, Text, Star, Text, Underline, Text, Underline, EndOfLine]
        );
        assert_eq!(tokens[1].text, "a ");
        assert_eq!(tokens[3].text, "b");
        assert_eq!(tokens[5].text, " ");
    }

    #[test]
    fn test_multibyte_text_survives() {
        let tokens = Tokenizer::new().tokenize_lines(&["héllo *wörld*"]);
        assert_eq!(tokens[1].text, "héllo ");
        assert_eq!(tokens[3].text, "wörld");
    }
}
