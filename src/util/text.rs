//! Tab-aware column arithmetic shared by the model and the painter

use ropey::RopeSlice;

/// Tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Width a tab occupies when it starts at `visual_col`
#[inline]
fn tab_advance(visual_col: usize) -> usize {
    TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH)
}

/// Convert a visual column (screen position) to character column.
/// Past the end of the line this returns the line length.
pub fn visual_col_to_char_col(text: &str, visual_col: usize) -> usize {
    let mut current_visual = 0;
    let mut char_col = 0;

    for ch in text.chars() {
        if current_visual >= visual_col {
            return char_col;
        }

        current_visual += if ch == '\t' {
            tab_advance(current_visual)
        } else {
            1
        };
        char_col += 1;
    }

    char_col
}

/// Convert a character column to visual column (screen position).
pub fn char_col_to_visual_col(text: &str, char_col: usize) -> usize {
    let mut visual_col = 0;

    for ch in text.chars().take(char_col) {
        visual_col += if ch == '\t' { tab_advance(visual_col) } else { 1 };
    }

    visual_col
}

/// Number of screen columns a whole line occupies
pub fn visual_width(text: &str) -> usize {
    char_col_to_visual_col(text, usize::MAX)
}

/// Length in chars of a rope line without its trailing line break.
/// Recognizes every break ropey splits lines on, "\r\n" counting as one.
pub fn line_content_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len > 1 && line.char(len - 2) == '\r' => len - 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => len - 1,
        _ => len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ropey::Rope;

    #[test]
    fn test_char_to_visual_without_tabs() {
        assert_eq!(char_col_to_visual_col("hello", 3), 3);
        assert_eq!(char_col_to_visual_col("hello", 99), 5);
    }

    #[test]
    fn test_char_to_visual_with_tabs() {
        // "a\tb": tab at column 1 advances to column 4
        assert_eq!(char_col_to_visual_col("a\tb", 1), 1);
        assert_eq!(char_col_to_visual_col("a\tb", 2), 4);
        assert_eq!(char_col_to_visual_col("\t\tx", 2), 8);
    }

    #[test]
    fn test_visual_to_char_inside_tab() {
        // Visual columns 1..4 are covered by the tab at char 1
        assert_eq!(visual_col_to_char_col("a\tb", 2), 2);
        assert_eq!(visual_col_to_char_col("a\tb", 4), 2);
        assert_eq!(visual_col_to_char_col("a\tb", 40), 3);
    }

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width(""), 0);
        assert_eq!(visual_width("    <ns:tag>"), 12);
        assert_eq!(visual_width("\tx"), 5);
    }

    #[test]
    fn test_line_content_len_strips_every_break() {
        let rope = Rope::from_str("ab\r\ncd\ref\u{2028}g\u{0085}h\n");
        let lens: Vec<usize> = rope.lines().map(line_content_len).collect();
        assert_eq!(lens, vec![2, 2, 2, 1, 1, 0]);
    }
}
