//! Tree-sitter parse state and highlight extraction
//!
//! Each buffer owns one [`Highlighter`]. The previous tree is kept so that a
//! re-highlight after an edit only reparses the changed region.
//!
//! Tree-sitter rows only break on `\n`, while the buffer's rope also breaks
//! on lone `\r` and the Unicode separators, so captures are mapped to
//! lines through a rope by byte offset, never through tree-sitter rows.

use ropey::Rope;
use streaming_iterator::StreamingIterator;
use tree_sitter::{InputEdit, Parser, Point, QueryCursor, Tree};

use super::highlights::{highlight_id_for_name, HighlightToken, SyntaxHighlights};
use super::loader::{Grammar, SyntaxError};
use crate::util::line_content_len;

/// Convert a byte offset to a tree-sitter Point (row, column in bytes)
fn byte_to_point(text: &str, byte_offset: usize) -> Point {
    let mut row = 0usize;
    let mut col = 0usize;

    for &byte in text.as_bytes().iter().take(byte_offset) {
        if byte == b'\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    Point { row, column: col }
}

/// Compute an InputEdit by diffing old and new source text.
/// Returns None if the sources are identical.
fn compute_incremental_edit(old_src: &str, new_src: &str) -> Option<InputEdit> {
    if old_src == new_src {
        return None;
    }

    let old_bytes = old_src.as_bytes();
    let new_bytes = new_src.as_bytes();

    // Common prefix (in bytes)
    let mut start = 0;
    let max_start = old_bytes.len().min(new_bytes.len());
    while start < max_start && old_bytes[start] == new_bytes[start] {
        start += 1;
    }

    // Common suffix, not overlapping the prefix
    let mut old_end = old_bytes.len();
    let mut new_end = new_bytes.len();
    while old_end > start && new_end > start && old_bytes[old_end - 1] == new_bytes[new_end - 1] {
        old_end -= 1;
        new_end -= 1;
    }

    Some(InputEdit {
        start_byte: start,
        old_end_byte: old_end,
        new_end_byte: new_end,
        start_position: byte_to_point(old_src, start),
        old_end_position: byte_to_point(old_src, old_end),
        new_end_position: byte_to_point(new_src, new_end),
    })
}

/// Parser, grammar and last tree for one buffer (tree-sitter parsers are !Sync)
pub struct Highlighter {
    grammar: Grammar,
    parser: Parser,
    tree: Option<Tree>,
    /// Source the cached tree was parsed from (needed for computing edits)
    source: String,
}

impl Highlighter {
    pub fn new(grammar: Grammar) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(grammar.language())
            .map_err(|e| SyntaxError::Language {
                language: grammar.language_id(),
                message: e.to_string(),
            })?;

        Ok(Self {
            grammar,
            parser,
            tree: None,
            source: String::new(),
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parse `source` and extract highlights.
    /// Uses incremental parsing when a previous tree is available.
    pub fn highlight(&mut self, source: &str, revision: u64) -> SyntaxHighlights {
        if let Some(tree) = self.tree.as_mut() {
            match compute_incremental_edit(&self.source, source) {
                Some(edit) => {
                    tree.edit(&edit);
                    tracing::trace!(
                        "Incremental parse: edit at byte {}..{} -> {}..{}",
                        edit.start_byte,
                        edit.old_end_byte,
                        edit.start_byte,
                        edit.new_end_byte
                    );
                }
                None => {
                    tracing::trace!("Source unchanged, reusing cached tree");
                    return self.extract_highlights(source, revision);
                }
            }
        }

        let tree = match self.parser.parse(source, self.tree.as_ref()) {
            Some(tree) => tree,
            None => {
                tracing::warn!(
                    "Incremental parse failed for {:?}, falling back to full parse",
                    self.grammar.language_id()
                );
                self.parser.reset();
                match self.parser.parse(source, None) {
                    Some(tree) => tree,
                    None => {
                        tracing::error!("Parse failed for {:?}", self.grammar.language_id());
                        self.tree = None;
                        self.source.clear();
                        return SyntaxHighlights::new(self.grammar.language_id(), revision);
                    }
                }
            }
        };

        self.tree = Some(tree);
        self.source = source.to_owned();
        self.extract_highlights(source, revision)
    }

    /// Forget the cached tree; the next highlight does a full parse
    pub fn reset(&mut self) {
        self.tree = None;
        self.source.clear();
        self.parser.reset();
    }

    /// Extract highlight tokens from the cached tree
    fn extract_highlights(&self, source: &str, revision: u64) -> SyntaxHighlights {
        let language = self.grammar.language_id();
        let mut highlights = SyntaxHighlights::new(language, revision);
        let Some(tree) = self.tree.as_ref() else {
            return highlights;
        };

        let query = self.grammar.query();
        let mut cursor = QueryCursor::new();
        let rope = Rope::from_str(source);

        let mut captures = cursor.captures(query, tree.root_node(), source.as_bytes());
        while let Some((query_match, capture_idx)) = captures.next() {
            let capture = &query_match.captures[*capture_idx];
            let capture_name = &query.capture_names()[capture.index as usize];

            let Some(highlight_id) = highlight_id_for_name(capture_name) else {
                continue;
            };

            let start = rope.byte_to_char(capture.node.start_byte().min(source.len()));
            let end = rope.byte_to_char(capture.node.end_byte().min(source.len()));
            let start_line = rope.char_to_line(start);
            let end_line = rope.char_to_line(end);

            // Multi-line nodes are split into one token per line
            for line in start_line..=end_line {
                let line_start = rope.line_to_char(line);
                let line_len = line_content_len(rope.line(line));

                let start_char = if line == start_line {
                    start - line_start
                } else {
                    0
                };
                let end_char = if line == end_line {
                    (end - line_start).min(line_len)
                } else {
                    line_len
                };

                if start_char < end_char {
                    highlights.push_token(
                        line,
                        HighlightToken {
                            start_col: start_char,
                            end_col: end_char,
                            highlight: highlight_id,
                        },
                    );
                }
            }
        }

        highlights.sort_tokens();
        highlights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{highlight_id_for_name, LanguageId};

    fn xml_highlighter() -> Highlighter {
        Highlighter::new(Grammar::builtin(LanguageId::Xml).unwrap()).unwrap()
    }

    #[test]
    fn test_byte_to_point() {
        let text = "ab\ncd\nef";
        assert_eq!(byte_to_point(text, 0), Point { row: 0, column: 0 });
        assert_eq!(byte_to_point(text, 4), Point { row: 1, column: 1 });
        assert_eq!(byte_to_point(text, 6), Point { row: 2, column: 0 });
    }

    #[test]
    fn test_incremental_edit_insert() {
        let edit = compute_incremental_edit("<a></a>", "<a>x</a>").unwrap();
        assert_eq!(edit.start_byte, 3);
        assert_eq!(edit.old_end_byte, 3);
        assert_eq!(edit.new_end_byte, 4);
    }

    #[test]
    fn test_incremental_edit_identical() {
        assert!(compute_incremental_edit("same", "same").is_none());
    }

    #[test]
    fn test_multibyte_text_maps_to_char_columns() {
        let mut highlighter = xml_highlighter();
        let highlights = highlighter.highlight("<é>\n<!-- ü -->\n</é>\n", 1);

        let comment = highlight_id_for_name("comment").unwrap();
        assert!(highlights
            .get_line_tokens(1)
            .iter()
            .any(|t| t.highlight == comment && (t.start_col, t.end_col) == (0, 10)));
    }

    #[test]
    fn test_unicode_line_separator_splits_tokens() {
        let mut highlighter = xml_highlighter();
        let highlights = highlighter.highlight("<a>\u{2028}<!-- x\u{2028}y -->\n</a>\n", 1);

        let comment = highlight_id_for_name("comment").unwrap();
        let on_line = |line: usize| {
            highlights
                .get_line_tokens(line)
                .iter()
                .find(|t| t.highlight == comment)
                .map(|t| (t.start_col, t.end_col))
        };
        assert_eq!(on_line(0), None);
        assert_eq!(on_line(1), Some((0, 6)));
        assert_eq!(on_line(2), Some((0, 5)));
    }

    #[test]
    fn test_xml_comment_highlighted() {
        let mut highlighter = xml_highlighter();
        let source = "<?xml version=\"1.0\"?>\n<!-- note -->\n<root/>\n";
        let highlights = highlighter.highlight(source, 1);

        let comment = highlight_id_for_name("comment").unwrap();
        let line1 = highlights.get_line_tokens(1);
        assert!(
            line1.iter().any(|t| t.highlight == comment && t.start_col == 0),
            "tokens on comment line: {:?}",
            line1
        );
        assert_eq!(highlights.revision, 1);
        assert_eq!(highlights.language, LanguageId::Xml);
    }

    #[test]
    fn test_multiline_comment_split_per_line() {
        let mut highlighter = xml_highlighter();
        let source = "<root>\n<!-- one\ntwo\nthree -->\n</root>\n";
        let highlights = highlighter.highlight(source, 1);

        let comment = highlight_id_for_name("comment").unwrap();
        for row in 1..=3 {
            assert!(
                highlights
                    .get_line_tokens(row)
                    .iter()
                    .any(|t| t.highlight == comment),
                "line {} lacks a comment token",
                row
            );
        }
        let middle = highlights
            .get_line_tokens(2)
            .iter()
            .find(|t| t.highlight == comment)
            .unwrap();
        assert_eq!((middle.start_col, middle.end_col), (0, 3));
    }

    #[test]
    fn test_incremental_reparse_matches_full_parse() {
        let before = "<root>\n  <a x=\"1\"/>\n</root>\n";
        let after = "<root>\n  <a x=\"1\"/>\n  <!-- added -->\n</root>\n";

        let mut incremental = xml_highlighter();
        incremental.highlight(before, 1);
        let reparsed = incremental.highlight(after, 2);

        let mut fresh = xml_highlighter();
        let full = fresh.highlight(after, 2);

        for line in 0..4 {
            assert_eq!(
                reparsed.get_line_tokens(line),
                full.get_line_tokens(line),
                "line {}",
                line
            );
        }
    }

    #[test]
    fn test_tokens_sorted_by_start_col() {
        let mut highlighter = xml_highlighter();
        let highlights =
            highlighter.highlight("<a b=\"c\" d=\"e\">text</a>\n", 1);
        let tokens = highlights.get_line_tokens(0);
        assert!(!tokens.is_empty());
        assert!(tokens.windows(2).all(|w| w[0].start_col <= w[1].start_col));
    }

    #[test]
    fn test_rust_and_python_produce_tokens() {
        let mut rust =
            Highlighter::new(Grammar::builtin(LanguageId::Rust).unwrap()).unwrap();
        assert!(rust.highlight("fn main() { let x = 42; }\n", 1).token_count() > 0);

        let mut python =
            Highlighter::new(Grammar::builtin(LanguageId::Python).unwrap()).unwrap();
        assert!(python.highlight("def f(x):\n    return x\n", 1).token_count() > 0);
    }

    #[test]
    fn test_reset_forces_full_parse() {
        let mut highlighter = xml_highlighter();
        highlighter.highlight("<a/>\n", 1);
        highlighter.reset();
        let highlights = highlighter.highlight("<!-- c -->\n", 2);
        assert!(highlights.token_count() > 0);
    }
}
