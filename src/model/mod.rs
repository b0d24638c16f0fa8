//! Application model - the complete state of the window
//!
//! Ownership is strictly tree-shaped:
//! `AppModel` → `ScrolledWindow` → `TextView` → `CodeBuffer` → `Grammar`.

pub mod buffer;
pub mod scrolled;
pub mod text_view;

pub use buffer::{CodeBuffer, Position};
pub use scrolled::{ScrollThumb, ScrolledWindow, Viewport, MIN_THUMB_LENGTH};
pub use text_view::{Direction, TextView};

use crate::config::AppConfig;
use crate::theme::Theme;
use crate::util::visual_col_to_char_col;

/// Padding between the window edge and the text (pixels)
pub const TEXT_PADDING_PX: usize = 4;
/// Thickness of the scrollbars (pixels)
pub const SCROLLBAR_SIZE_PX: usize = 10;

/// Rectangle in window pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Window title
    pub title: String,
    /// The window's only child
    pub scrolled: ScrolledWindow,
    pub theme: Theme,
    pub config: AppConfig,
    /// Window size in physical pixels
    pub window_size: (u32, u32),
    /// Line height in pixels
    pub line_height: usize,
    /// Advance of one monospace cell in pixels
    pub char_width: f32,
}

impl AppModel {
    pub fn new(buffer: CodeBuffer, theme: Theme, config: AppConfig) -> Self {
        let title = format!("CodeBuffer — {}", buffer.language().display_name());
        let window_size = (config.window_width, config.window_height);
        let mut model = Self {
            title,
            scrolled: ScrolledWindow::new(TextView::new(buffer)),
            theme,
            config,
            window_size,
            line_height: 20,
            char_width: 10.0,
        };
        model.update_viewport();
        model
    }

    pub fn text_view(&self) -> &TextView {
        self.scrolled.child()
    }

    pub fn text_view_mut(&mut self) -> &mut TextView {
        self.scrolled.child_mut()
    }

    pub fn buffer(&self) -> &CodeBuffer {
        self.text_view().buffer()
    }

    /// Apply font metrics measured by the renderer
    pub fn set_char_metrics(&mut self, char_width: f32, line_height: usize) {
        self.char_width = char_width.max(1.0);
        self.line_height = line_height.max(1);
        self.update_viewport();
    }

    /// Window resized (physical pixels)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.update_viewport();
    }

    /// Area the text is drawn in, excluding the scrollbar gutters
    pub fn text_area(&self) -> Rect {
        let (width, height) = self.window_size;
        Rect::new(
            0.0,
            0.0,
            (width as usize).saturating_sub(SCROLLBAR_SIZE_PX) as f32,
            (height as usize).saturating_sub(SCROLLBAR_SIZE_PX) as f32,
        )
    }

    fn update_viewport(&mut self) {
        let area = self.text_area();
        let usable_w = (area.width as usize).saturating_sub(TEXT_PADDING_PX * 2);
        let usable_h = (area.height as usize).saturating_sub(TEXT_PADDING_PX);
        let visible_lines = usable_h / self.line_height;
        let visible_columns = (usable_w as f32 / self.char_width).floor() as usize;
        self.scrolled.resize(visible_lines, visible_columns);
    }

    /// Map a window pixel to the nearest buffer position
    pub fn pixel_to_position(&self, x: f64, y: f64) -> Position {
        let viewport = self.scrolled.viewport;
        let rel_y = (y.max(0.0) as usize).saturating_sub(TEXT_PADDING_PX);
        let line = viewport.top_line + rel_y / self.line_height;

        let rel_x = (x - TEXT_PADDING_PX as f64).max(0.0);
        let visual_col = viewport.left_column + (rel_x / self.char_width as f64).round() as usize;

        let buffer = self.buffer();
        let line = line.min(buffer.line_count().saturating_sub(1));
        let column = visual_col_to_char_col(&buffer.line(line), visual_col);
        Position::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &str) -> AppModel {
        AppModel::new(
            CodeBuffer::with_text(None, text),
            Theme::default(),
            AppConfig::default(),
        )
    }

    #[test]
    fn test_default_viewport_from_window_size() {
        let model = model("a");
        // 300x200 window, 10px scrollbars, 4px padding, 20px lines, 10px cells
        assert_eq!(model.window_size, (300, 200));
        assert_eq!(model.scrolled.viewport.visible_lines, 9);
        assert_eq!(model.scrolled.viewport.visible_columns, 28);
    }

    #[test]
    fn test_set_char_metrics_recomputes_viewport() {
        let mut model = model("a");
        model.set_char_metrics(7.0, 16);
        assert_eq!(model.scrolled.viewport.visible_lines, 11);
        assert_eq!(model.scrolled.viewport.visible_columns, 40);
    }

    #[test]
    fn test_pixel_to_position() {
        let model = model("abc\n\tx\nlast");
        assert_eq!(model.pixel_to_position(4.0, 4.0), Position::new(0, 0));
        assert_eq!(model.pixel_to_position(26.0, 10.0), Position::new(0, 2));
        // Inside the tab on line 1 lands after it
        assert_eq!(model.pixel_to_position(24.0, 30.0), Position::new(1, 1));
        // Below the last line clamps
        assert_eq!(model.pixel_to_position(4.0, 190.0), Position::new(2, 0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(10.0, 14.9));
        assert!(!rect.contains(15.0, 10.0));
    }
}
