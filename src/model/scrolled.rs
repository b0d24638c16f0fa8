//! Scrolled window - a viewport over a text view
//!
//! Scrollbars follow the automatic policy: a bar is shown only when the
//! content does not fit in that direction.

use super::text_view::TextView;
use crate::util::{char_col_to_visual_col, visual_width};

/// Minimum scrollbar thumb length in pixels
pub const MIN_THUMB_LENGTH: usize = 12;

/// Visible region of the text view, in lines and visual columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line (0-indexed)
    pub top_line: usize,
    /// First visible visual column (0-indexed)
    pub left_column: usize,
    /// Number of fully or partially visible lines
    pub visible_lines: usize,
    /// Number of visible columns
    pub visible_columns: usize,
}

/// Position and size of a scrollbar thumb along its track (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollThumb {
    pub offset: usize,
    pub length: usize,
}

impl ScrollThumb {
    /// Thumb for `visible` out of `total` units scrolled to `position`
    fn compute(track: usize, total: usize, visible: usize, position: usize) -> Option<Self> {
        if total <= visible || track == 0 {
            return None;
        }
        let length = (track * visible / total).max(MIN_THUMB_LENGTH).min(track);
        let max_position = total - visible;
        let offset = (track - length) * position.min(max_position) / max_position;
        Some(Self { offset, length })
    }
}

/// Scrollable container owning a single text view
#[derive(Debug)]
pub struct ScrolledWindow {
    child: TextView,
    pub viewport: Viewport,
}

impl ScrolledWindow {
    pub fn new(child: TextView) -> Self {
        Self {
            child,
            viewport: Viewport::default(),
        }
    }

    pub fn child(&self) -> &TextView {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut TextView {
        &mut self.child
    }

    /// Content size as (lines, widest line in visual columns)
    pub fn content_extent(&self) -> (usize, usize) {
        let buffer = self.child.buffer();
        let widest = (0..buffer.line_count())
            .map(|line| visual_width(&buffer.line(line)))
            .max()
            .unwrap_or(0);
        (buffer.line_count(), widest)
    }

    /// Scrollable width: the widest line plus the caret cell after it
    fn scroll_width(&self) -> usize {
        self.content_extent().1 + 1
    }

    pub fn max_top_line(&self) -> usize {
        self.child
            .buffer()
            .line_count()
            .saturating_sub(self.viewport.visible_lines)
    }

    pub fn max_left_column(&self) -> usize {
        self.scroll_width()
            .saturating_sub(self.viewport.visible_columns)
    }

    /// Set the visible size and re-clamp the scroll position
    pub fn resize(&mut self, visible_lines: usize, visible_columns: usize) {
        self.viewport.visible_lines = visible_lines;
        self.viewport.visible_columns = visible_columns;
        self.clamp_scroll();
    }

    pub fn clamp_scroll(&mut self) {
        self.viewport.top_line = self.viewport.top_line.min(self.max_top_line());
        self.viewport.left_column = self.viewport.left_column.min(self.max_left_column());
    }

    /// Scroll vertically (positive = down)
    pub fn scroll_by(&mut self, lines: i32) {
        let target = self.viewport.top_line as i64 + lines as i64;
        self.viewport.top_line = (target.max(0) as usize).min(self.max_top_line());
    }

    /// Scroll horizontally (positive = right)
    pub fn scroll_horizontal_by(&mut self, columns: i32) {
        let target = self.viewport.left_column as i64 + columns as i64;
        self.viewport.left_column = (target.max(0) as usize).min(self.max_left_column());
    }

    /// Scroll the minimum amount that brings the caret into view
    pub fn ensure_cursor_visible(&mut self) {
        let cursor = self.child.buffer().clamp(self.child.cursor());
        let viewport = &mut self.viewport;

        if viewport.visible_lines > 0 {
            if cursor.line < viewport.top_line {
                viewport.top_line = cursor.line;
            } else if cursor.line >= viewport.top_line + viewport.visible_lines {
                viewport.top_line = cursor.line + 1 - viewport.visible_lines;
            }
        }

        if viewport.visible_columns > 0 {
            let line = self.child.buffer().line(cursor.line);
            let visual = char_col_to_visual_col(&line, cursor.column);
            if visual < viewport.left_column {
                viewport.left_column = visual;
            } else if visual >= viewport.left_column + viewport.visible_columns {
                viewport.left_column = visual + 1 - viewport.visible_columns;
            }
        }

        self.clamp_scroll();
    }

    /// Vertical scrollbar thumb, or None when every line fits
    pub fn vertical_thumb(&self, track: usize) -> Option<ScrollThumb> {
        let total = self.child.buffer().line_count();
        ScrollThumb::compute(
            track,
            total,
            self.viewport.visible_lines,
            self.viewport.top_line,
        )
    }

    /// Horizontal scrollbar thumb, or None when the widest line and caret fit
    pub fn horizontal_thumb(&self, track: usize) -> Option<ScrollThumb> {
        ScrollThumb::compute(
            track,
            self.scroll_width(),
            self.viewport.visible_columns,
            self.viewport.left_column,
        )
    }
}
