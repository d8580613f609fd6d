//! Conversion context threaded through the tree walk.
//!
//! One [`Context`] is created per conversion call and owned exclusively
//! by it. Every renderer appends through [`Context::push`], which keeps
//! two invariants on the accumulated text: it never starts with a
//! newline and never holds a run of more than two newlines. Warning line
//! numbers are computed from that normalized text, so they match the
//! final output.

use super::footnotes::FootnoteStore;
use super::lists::ListCounters;
use super::options::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A non-fatal conversion issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub message: String,
    /// 1-based line of the output where the issue was found
    pub line: usize,
}

/// Markdown text plus the warnings collected while producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub markdown: String,
    pub warnings: Vec<Warning>,
}

/// Mutable state of one conversion.
pub struct Context<'o> {
    options: &'o ConvertOptions,
    text: String,
    skip_leading_newline: bool,
    in_list_run: bool,
    footnotes: FootnoteStore,
    warnings: Vec<Warning>,
    list_counters: ListCounters,
}

impl<'o> Context<'o> {
    pub fn new(options: &'o ConvertOptions) -> Self {
        Context {
            options,
            text: String::new(),
            skip_leading_newline: false,
            in_list_run: false,
            footnotes: FootnoteStore::default(),
            warnings: Vec::new(),
            list_counters: ListCounters::default(),
        }
    }

    pub fn options(&self) -> &'o ConvertOptions {
        self.options
    }

    /// The text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append text, consuming a pending skip-leading-newline request and
    /// collapsing newline runs to at most two. Spaces and tabs before a
    /// newline are dropped so whitespace-only lines count as blank.
    pub fn push(&mut self, s: &str) {
        let stripped = strip_blanks_before_newlines(s);
        let mut s = stripped.as_ref();
        if self.skip_leading_newline && !s.is_empty() {
            self.skip_leading_newline = false;
            s = s.trim_start_matches('\n');
        }
        if self.text.is_empty() {
            s = s.trim_start_matches('\n');
        }
        if s.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(s);
        self.collapse_newlines(start);
    }

    /// Start a new line unless the text already ends with one.
    pub fn ensure_newline(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.push("\n");
        }
    }

    /// Request that leading newlines of the next append be dropped.
    pub fn skip_next_leading_newline(&mut self) {
        self.skip_leading_newline = true;
    }

    /// Drop a pending skip request that nothing consumed.
    pub fn clear_skip_leading_newline(&mut self) {
        self.skip_leading_newline = false;
    }

    pub fn in_list_run(&self) -> bool {
        self.in_list_run
    }

    pub fn set_list_run(&mut self, in_list_run: bool) {
        self.in_list_run = in_list_run;
    }

    /// Current position in the accumulated text.
    pub fn mark(&self) -> usize {
        self.text.len()
    }

    /// Discard everything appended after `mark`.
    pub fn truncate(&mut self, mark: usize) {
        self.text.truncate(mark);
    }

    /// Remove and return everything appended after `mark`.
    pub fn take_since(&mut self, mark: usize) -> String {
        self.text.split_off(mark)
    }

    /// Trim surrounding whitespace of what was appended after `mark`.
    /// Returns whether anything is left.
    pub fn trim_since(&mut self, mark: usize) -> bool {
        let tail = self.text.split_off(mark);
        let trimmed = tail.trim();
        self.text.push_str(trimmed);
        !trimmed.is_empty()
    }

    /// 1-based line number of the end of the accumulated text.
    pub fn line(&self) -> usize {
        self.text.bytes().filter(|b| *b == b'\n').count() + 1
    }

    /// Record a warning at the current line.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        let line = self.line();
        log::debug!("conversion warning at line {line}: {message}");
        self.warnings.push(Warning { message, line });
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn footnotes_mut(&mut self) -> &mut FootnoteStore {
        &mut self.footnotes
    }

    pub fn list_counters_mut(&mut self) -> &mut ListCounters {
        &mut self.list_counters
    }

    /// Record the given line on every warning raised since `first`.
    pub fn relocate_warnings(&mut self, first: usize, line: usize) {
        for warning in self.warnings.iter_mut().skip(first) {
            warning.line = line;
        }
    }

    /// Finalize: trim lines and the whole text, then append footnote
    /// definitions after a blank line.
    pub fn finish(self) -> ConversionResult {
        let body = self
            .text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");

        let mut markdown = collapse_newline_runs(body.trim());
        if !self.footnotes.is_empty() {
            if !markdown.is_empty() {
                markdown.push_str("\n\n");
            }
            markdown.push_str(&self.footnotes.definitions().join("\n"));
        }

        ConversionResult {
            markdown,
            warnings: self.warnings,
        }
    }

    fn collapse_newlines(&mut self, start: usize) {
        let bytes = self.text.as_bytes();
        let mut from = start;
        while from > 0 && bytes[from - 1] == b'\n' {
            from -= 1;
        }
        if !self.text[from..].contains("\n\n\n") {
            return;
        }

        let tail = self.text.split_off(from);
        self.text.push_str(&collapse_newline_runs(&tail));
    }
}

fn collapse_newline_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run > 2 {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(ch);
    }
    out
}

fn strip_blanks_before_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains(" \n") && !s.contains("\t\n") {
        return Cow::Borrowed(s);
    }
    let mut lines: Vec<&str> = s.split('\n').collect();
    let last = lines.len() - 1;
    for line in &mut lines[..last] {
        *line = line.trim_end_matches([' ', '\t']);
    }
    Cow::Owned(lines.join("\n"))
}
