//! Troff (`man` macro package) backend.

use crate::render::Renderer;
use crate::writer::ManWriter;

/// Escapes text for use on a troff text line.
///
/// Backslashes become `\e`; a leading `.` or `'` is shielded with `\&` so
/// the line is not read as a request.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    if text.starts_with(['.', '\'']) {
        out.push_str("\\&");
    }
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\e"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes `text` as a double-quoted macro argument.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\e"),
            '"' => out.push_str("\\(dq"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Flag name with its dash, as a bold run (`\fB\-name\fR`).
fn bold_flag(name: &str) -> String {
    format!("\\fB\\-{}\\fR", escape(name).replace('-', "\\-"))
}

/// Renders nodes as `man` macros into a [`ManWriter`].
///
/// Text arguments are trimmed; empty ones produce no output.
pub struct TroffRenderer<'w> {
    out: &'w mut ManWriter,
}

impl<'w> TroffRenderer<'w> {
    pub fn new(out: &'w mut ManWriter) -> Self {
        Self { out }
    }

    /// Writes the tagged paragraph heading of one flag, e.g.
    /// `\fB\-o\fR, \fB\-output\fR \fIpath\fR`.
    pub fn flag_heading(&mut self, name: &str, short: &str, param: &str) {
        let mut heading = String::new();
        if !short.is_empty() {
            heading.push_str(&bold_flag(short));
            heading.push_str(", ");
        }
        heading.push_str(&bold_flag(name));
        if !param.is_empty() {
            heading.push_str(&format!(" \\fI{}\\fR", escape(param)));
        }
        self.out.line(".TP");
        self.out.line(&heading);
    }

    fn macro_line(&mut self, name: &str, arg: &str) {
        let arg = arg.trim();
        if !arg.is_empty() {
            self.out.line(&format!(".{name} {}", quote(arg)));
        }
    }
}

impl Renderer for TroffRenderer<'_> {
    fn group_start(&mut self, is_root: bool) {
        if !is_root {
            self.out.line(".RS");
        }
    }

    fn group_end(&mut self, is_root: bool) {
        if !is_root {
            self.out.line(".RE");
        }
    }

    fn block_start(&mut self) {
        self.out.line(".RS");
        self.out.line(".nf");
    }

    fn block_end(&mut self) {
        self.out.line(".fi");
        self.out.line(".RE");
    }

    fn list_item(&mut self, label: &str) {
        self.out.line(".TP");
        if label == "*" {
            self.out.line("\\(bu");
        } else {
            self.out.line(&format!("\\fB{}\\fR", escape(label)));
        }
    }

    fn section(&mut self, title: &str) {
        self.out.activate(title.trim());
        self.out.line(&format!(".SH {}", quote(&title.trim().to_uppercase())));
    }

    fn text(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.out.line(&escape(text));
        }
    }

    fn text_bold(&mut self, text: &str) {
        self.macro_line("B", text);
    }

    fn text_underline(&mut self, text: &str) {
        self.macro_line("I", text);
    }

    fn paragraph_break(&mut self) {
        self.out.line(".PP");
    }
}
