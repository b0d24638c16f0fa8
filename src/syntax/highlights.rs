//! Highlight tokens and the capture-name table
//!
//! Query captures are mapped onto `HIGHLIGHT_NAMES`; a dotted capture that
//! is not listed falls back to its nearest listed parent.

use super::languages::LanguageId;

/// Capture names mapped to theme colors.
/// Index into this array is the HighlightId.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",             // @attribute (XML attribute names)
    "boolean",               // @boolean (true, false, yes, no)
    "character",             // @character (char literals)
    "comment",               // @comment
    "constant",              // @constant
    "constant.builtin",      // @constant.builtin (None, nil)
    "constructor",           // @constructor
    "embedded",              // @embedded (processing instructions)
    "escape",                // @escape (string escapes, entity references)
    "function",              // @function
    "function.builtin",      // @function.builtin
    "function.method",       // @function.method
    "keyword",               // @keyword
    "label",                 // @label
    "markup",                // @markup (XML character data)
    "markup.heading",        // @markup.heading (CDATA delimiters)
    "markup.raw",            // @markup.raw (CDATA content)
    "module",                // @module (namespace prefixes)
    "number",                // @number
    "operator",              // @operator
    "property",              // @property
    "punctuation",           // @punctuation
    "punctuation.bracket",   // @punctuation.bracket
    "punctuation.delimiter", // @punctuation.delimiter (< > </ />)
    "punctuation.special",   // @punctuation.special
    "string",                // @string
    "string.special",        // @string.special (encodings, URIs)
    "tag",                   // @tag
    "type",                  // @type
    "type.builtin",          // @type.builtin
    "variable",              // @variable
    "variable.builtin",      // @variable.builtin (self)
    "variable.parameter",    // @variable.parameter
];

/// Position in `HIGHLIGHT_NAMES`
pub type HighlightId = u16;

/// Highlighted char range `start_col..end_col` on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightToken {
    pub start_col: usize,
    pub end_col: usize,
    pub highlight: HighlightId,
}

/// Tokens on one line, ordered by `(start_col, end_col)`
#[derive(Debug, Clone, Default)]
pub struct LineHighlights {
    pub tokens: Vec<HighlightToken>,
}

impl LineHighlights {
    /// First token covering `col`
    pub fn highlight_at(&self, col: usize) -> Option<HighlightId> {
        self.tokens
            .iter()
            .take_while(|t| t.start_col <= col)
            .find(|t| col < t.end_col)
            .map(|t| t.highlight)
    }
}

/// Highlights for a whole buffer at one revision
#[derive(Debug, Clone, Default)]
pub struct SyntaxHighlights {
    /// Indexed by line; trailing lines without tokens may be absent
    pub lines: Vec<LineHighlights>,
    pub revision: u64,
    pub language: LanguageId,
}

impl SyntaxHighlights {
    pub fn new(language: LanguageId, revision: u64) -> Self {
        Self {
            lines: Vec::new(),
            revision,
            language,
        }
    }

    /// Append a token to `line`; call `sort_tokens` once all are pushed
    pub fn push_token(&mut self, line: usize, token: HighlightToken) {
        if self.lines.len() <= line {
            self.lines.resize_with(line + 1, LineHighlights::default);
        }
        self.lines[line].tokens.push(token);
    }

    pub fn sort_tokens(&mut self) {
        for line in &mut self.lines {
            line.tokens.sort_by_key(|t| (t.start_col, t.end_col));
        }
    }

    pub fn get_line(&self, line: usize) -> Option<&LineHighlights> {
        self.lines.get(line)
    }

    /// Tokens for `line`, empty when it has none
    pub fn get_line_tokens(&self, line: usize) -> &[HighlightToken] {
        self.lines
            .get(line)
            .map(|lh| lh.tokens.as_slice())
            .unwrap_or(&[])
    }

    pub fn token_count(&self) -> usize {
        self.lines.iter().map(|lh| lh.tokens.len()).sum()
    }
}

/// `name`, then each dotted parent: "a.b.c", "a.b", "a"
pub fn capture_name_chain(name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(name), |&current| {
        current.rfind('.').map(|dot| &current[..dot])
    })
}

/// Highlight id for a capture name, falling back to dotted parents
pub fn highlight_id_for_name(name: &str) -> Option<HighlightId> {
    capture_name_chain(name).find_map(|candidate| {
        HIGHLIGHT_NAMES
            .iter()
            .position(|&n| n == candidate)
            .map(|pos| pos as HighlightId)
    })
}

pub fn highlight_name(id: HighlightId) -> Option<&'static str> {
    HIGHLIGHT_NAMES.get(id as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(start_col: usize, end_col: usize, highlight: HighlightId) -> HighlightToken {
        HighlightToken {
            start_col,
            end_col,
            highlight,
        }
    }

    #[test]
    fn test_capture_name_chain() {
        let chain: Vec<_> = capture_name_chain("markup.raw.block").collect();
        assert_eq!(chain, ["markup.raw.block", "markup.raw", "markup"]);
        assert_eq!(capture_name_chain("tag").count(), 1);
    }

    #[test]
    fn test_highlight_id_lookup() {
        assert!(highlight_id_for_name("tag").is_some());
        assert!(highlight_id_for_name("punctuation.delimiter").is_some());
        assert_eq!(
            highlight_id_for_name("comment.documentation"),
            highlight_id_for_name("comment")
        );
        assert!(highlight_id_for_name("nonexistent.thing").is_none());
    }

    #[test]
    fn test_highlight_name_inverse() {
        let id = highlight_id_for_name("attribute").unwrap();
        assert_eq!(highlight_name(id), Some("attribute"));
        assert_eq!(highlight_name(u16::MAX), None);
    }

    #[test]
    fn test_highlight_at_gaps_and_overlaps() {
        let line = LineHighlights {
            tokens: vec![token(0, 5, 1), token(2, 3, 7), token(10, 15, 2)],
        };
        assert_eq!(line.highlight_at(0), Some(1));
        assert_eq!(line.highlight_at(2), Some(1));
        assert_eq!(line.highlight_at(5), None);
        assert_eq!(line.highlight_at(12), Some(2));
        assert_eq!(line.highlight_at(15), None);
    }

    #[test]
    fn test_push_token_grows_and_sorts() {
        let mut highlights = SyntaxHighlights::new(LanguageId::Xml, 3);
        highlights.push_token(4, token(6, 8, 0));
        highlights.push_token(4, token(1, 2, 0));
        highlights.sort_tokens();

        assert_eq!(highlights.lines.len(), 5);
        assert!(highlights.get_line_tokens(2).is_empty());
        assert!(highlights.get_line_tokens(42).is_empty());
        assert_eq!(highlights.get_line_tokens(4)[0].start_col, 1);
        assert_eq!(highlights.token_count(), 2);
    }
}
