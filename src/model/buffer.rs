//! Code buffer - rope text bound to an optional grammar
//!
//! Every mutation bumps the revision and re-highlights synchronously, so
//! `highlights()` always describes the current text.

use std::borrow::Cow;

use ropey::Rope;

use crate::syntax::{Grammar, Highlighter, HighlightToken, LanguageId, SyntaxHighlights};
use crate::util::line_content_len;

/// A position in the buffer (line and column, both in chars)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Text plus its highlighting state
pub struct CodeBuffer {
    text: Rope,
    highlighter: Option<Highlighter>,
    highlights: SyntaxHighlights,
    /// Incremented on each edit
    revision: u64,
    /// Set by edits, cleared by `set_text`
    modified: bool,
}

impl CodeBuffer {
    /// Create an empty buffer. `None` means plain text.
    pub fn new(grammar: Option<Grammar>) -> Self {
        let mut buffer = Self {
            text: Rope::new(),
            highlighter: None,
            highlights: SyntaxHighlights::default(),
            revision: 0,
            modified: false,
        };
        buffer.install_grammar(grammar);
        buffer.rehighlight();
        buffer
    }

    /// Create a buffer with initial text
    pub fn with_text(grammar: Option<Grammar>, text: &str) -> Self {
        let mut buffer = Self::new(grammar);
        buffer.set_text(text);
        buffer
    }

    fn install_grammar(&mut self, grammar: Option<Grammar>) {
        self.highlighter = grammar.and_then(|grammar| match Highlighter::new(grammar) {
            Ok(highlighter) => Some(highlighter),
            Err(e) => {
                tracing::error!("Falling back to plain text: {}", e);
                None
            }
        });
    }

    fn rehighlight(&mut self) {
        self.highlights = match self.highlighter.as_mut() {
            Some(highlighter) => highlighter.highlight(&self.text.to_string(), self.revision),
            None => SyntaxHighlights::new(LanguageId::PlainText, self.revision),
        };
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.modified = true;
        self.rehighlight();
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        self.revision += 1;
        self.modified = false;
        self.rehighlight();
        tracing::debug!(
            "Buffer text set: {} lines, revision {}",
            self.line_count(),
            self.revision
        );
    }

    /// Switch grammar (or drop highlighting) and re-highlight from scratch
    pub fn reset_language(&mut self, grammar: Option<Grammar>) {
        tracing::info!(
            "Resetting buffer language to {}",
            grammar
                .as_ref()
                .map(|g| g.display_name())
                .unwrap_or("Plain Text")
        );
        self.install_grammar(grammar);
        self.revision += 1;
        self.rehighlight();
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    /// Number of lines (a trailing line break starts a final empty line)
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Line content without its line break
    pub fn line(&self, line_idx: usize) -> Cow<'_, str> {
        if line_idx >= self.text.len_lines() {
            return Cow::Borrowed("");
        }
        let slice = self.text.line(line_idx);
        let len = self.line_len(line_idx);
        let slice = slice.slice(..len);
        match slice.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(slice.to_string()),
        }
    }

    /// Line length in chars, excluding its line break
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.text.len_lines() {
            return 0;
        }
        line_content_len(self.text.line(line_idx))
    }

    /// Clamp a position into the buffer
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        Position::new(line, pos.column.min(self.line_len(line)))
    }

    /// Convert a (clamped) position to a char offset
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let pos = self.clamp(pos);
        self.text.line_to_char(pos.line) + pos.column
    }

    /// Convert a char offset to a position
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.text.len_chars());
        let line = self.text.char_to_line(clamped);
        Position::new(line, clamped - self.text.line_to_char(line))
    }

    /// Insert text at `pos`, returning the position just after the inserted text
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        let offset = self.position_to_offset(pos);
        if text.is_empty() {
            return self.offset_to_position(offset);
        }
        self.text.insert(offset, text);
        self.touch();
        self.offset_to_position(offset + text.chars().count())
    }

    /// Delete the text between two positions (in either order).
    /// Returns the removed text.
    pub fn delete(&mut self, start: Position, end: Position) -> String {
        let a = self.position_to_offset(start);
        let b = self.position_to_offset(end);
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        if from == to {
            return String::new();
        }
        let removed = self.text.slice(from..to).to_string();
        self.text.remove(from..to);
        self.touch();
        removed
    }

    /// Delete a char range directly (used for joining lines across "\r\n")
    pub fn delete_offsets(&mut self, from: usize, to: usize) -> String {
        let to = to.min(self.text.len_chars());
        if from >= to {
            return String::new();
        }
        let removed = self.text.slice(from..to).to_string();
        self.text.remove(from..to);
        self.touch();
        removed
    }

    pub fn grammar(&self) -> Option<&Grammar> {
        self.highlighter.as_ref().map(|h| h.grammar())
    }

    pub fn language(&self) -> LanguageId {
        self.grammar()
            .map(|g| g.language_id())
            .unwrap_or(LanguageId::PlainText)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn highlights(&self) -> &SyntaxHighlights {
        &self.highlights
    }

    /// Highlight tokens for one line
    pub fn line_tokens(&self, line: usize) -> &[HighlightToken] {
        self.highlights.get_line_tokens(line)
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for CodeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeBuffer")
            .field("language", &self.language())
            .field("lines", &self.line_count())
            .field("revision", &self.revision)
            .field("modified", &self.modified)
            .finish()
    }
}
