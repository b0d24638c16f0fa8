//! Pixel buffer drawing
//!
//! `Frame` wraps a softbuffer-style `[u32]` ARGB buffer. Every write goes
//! through the current bounds (the whole frame, or the clip rectangle), so
//! callers never index the buffer directly.

use std::ops::Range;

use fontdue::Font;

use super::font::GlyphCache;
use crate::model::Rect;
use crate::syntax::HighlightToken;
use crate::theme::SyntaxTheme;
use crate::util::TABULATOR_WIDTH;

/// Composite the RGB channels of `fg` over `bg` at `alpha` (0.0..=1.0).
///
/// The result is always opaque.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let mix = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        ((b + (f - b) * alpha) as u32).min(0xFF) << shift
    };
    0xFF00_0000 | mix(16) | mix(8) | mix(0)
}

/// Half-open pixel rectangle that drawing is confined to
#[derive(Clone, Debug, PartialEq, Eq)]
struct Bounds {
    x: Range<usize>,
    y: Range<usize>,
}

impl Bounds {
    fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0..width,
            y: 0..height,
        }
    }

    #[inline]
    fn contains(&self, x: usize, y: usize) -> bool {
        self.x.contains(&x) && self.y.contains(&y)
    }

    /// Intersect an `x, y, w, h` rectangle with these bounds
    fn span(&self, x: usize, y: usize, w: usize, h: usize) -> (Range<usize>, Range<usize>) {
        let xs = x.max(self.x.start)..x.saturating_add(w).min(self.x.end);
        let ys = y.max(self.y.start)..y.saturating_add(h).min(self.y.end);
        (xs, ys)
    }
}

/// Convert a float rectangle to `x, y, w, h` pixels, clamping negatives to 0
fn rect_px(rect: Rect) -> (usize, usize, usize, usize) {
    let x0 = rect.x.max(0.0) as usize;
    let y0 = rect.y.max(0.0) as usize;
    let x1 = (rect.x + rect.width).max(0.0) as usize;
    let y1 = (rect.y + rect.height).max(0.0) as usize;
    (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

/// Mutable view of a window-sized ARGB pixel buffer
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    bounds: Bounds,
}

impl<'a> Frame<'a> {
    /// Wrap `buffer` as a `width` x `height` frame.
    ///
    /// A buffer shorter than `width * height` loses its trailing rows.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = match width {
            0 => height,
            _ => height.min(buffer.len() / width),
        };
        Self {
            buffer,
            width,
            height,
            bounds: Bounds::full(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Confine later drawing to `rect` (intersected with the frame)
    pub fn set_clip(&mut self, rect: Rect) {
        let (x, y, w, h) = rect_px(rect);
        let (xs, ys) = Bounds::full(self.width, self.height).span(x, y, w, h);
        self.bounds = Bounds { x: xs, y: ys };
    }

    pub fn clear_clip(&mut self) {
        self.bounds = Bounds::full(self.width, self.height);
    }

    /// Right edge of the drawable area
    #[inline]
    fn right(&self) -> usize {
        self.bounds.x.end
    }

    /// Fill the whole buffer, ignoring the clip
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x, y, w, h) = rect_px(rect);
        self.fill_rect_px(x, y, w, h, color);
    }

    /// Opaque fill of an `x, y, w, h` pixel rectangle
    pub fn fill_rect_px(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let (xs, ys) = self.bounds.span(x, y, w, h);
        if xs.is_empty() {
            return;
        }
        for row in ys {
            let start = row * self.width;
            self.buffer[start + xs.start..start + xs.end].fill(color);
        }
    }

    /// Alpha-blended fill; the alpha comes from the high byte of `color`
    pub fn blend_rect_px(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let alpha = (color >> 24) as u8;
        match alpha {
            0 => {}
            0xFF => self.fill_rect_px(x, y, w, h, color),
            _ => {
                let alpha = alpha as f32 / 255.0;
                let (xs, ys) = self.bounds.span(x, y, w, h);
                if xs.is_empty() {
                    return;
                }
                for row in ys {
                    let start = row * self.width;
                    for pixel in &mut self.buffer[start + xs.start..start + xs.end] {
                        *pixel = blend_colors(*pixel, color, alpha);
                    }
                }
            }
        }
    }

    /// Write one pixel if it lies inside the drawable area
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if self.bounds.contains(x, y) {
            self.buffer[y * self.width + x] = color;
        }
    }

    /// Read one pixel; 0 outside the frame
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend one pixel using the alpha in the high byte of `color`
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        self.blend_coverage(x, y, color, (color >> 24) as u8);
    }

    /// Blend `color` at a glyph coverage value (0 = none, 255 = opaque)
    #[inline]
    fn blend_coverage(&mut self, x: usize, y: usize, color: u32, coverage: u8) {
        if coverage == 0 || !self.bounds.contains(x, y) {
            return;
        }
        let idx = y * self.width + x;
        self.buffer[idx] = match coverage {
            0xFF => color | 0xFF00_0000,
            _ => blend_colors(self.buffer[idx], color, coverage as f32 / 255.0),
        };
    }
}

/// Text rendering context wrapping font and glyph cache.
///
/// Text is laid out on a fixed monospace grid: every char occupies one cell
/// of `char_width`, tabs expand to the next tab stop.
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
    char_width: f32,
    line_height: usize,
}

impl<'a> TextPainter<'a> {
    pub fn new(
        font: &'a Font,
        glyph_cache: &'a mut GlyphCache,
        font_size: f32,
        ascent: f32,
        char_width: f32,
        line_height: usize,
    ) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
            char_width,
            line_height,
        }
    }

    #[inline]
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    #[inline]
    pub fn line_height(&self) -> usize {
        self.line_height
    }

    /// Draw plain text at the specified position
    pub fn draw(&mut self, frame: &mut Frame, x: usize, y: usize, text: &str, color: u32) {
        let baseline = y as f32 + self.ascent;
        for (cell, ch) in text.chars().enumerate() {
            let pen_x = x as f32 + cell as f32 * self.char_width;
            self.draw_glyph(frame, pen_x, baseline, ch, color);
        }
    }

    /// Draw one buffer line with syntax highlighting
    ///
    /// `left_column` is the first visible visual column; chars before it are
    /// skipped. Chars outside every token use the theme's default color.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        frame: &mut Frame,
        x: usize,
        y: usize,
        text: &str,
        tokens: &[HighlightToken],
        left_column: usize,
        syntax_theme: &SyntaxTheme,
    ) {
        let baseline = y as f32 + self.ascent;
        let default_color = syntax_theme.default_color().to_argb_u32();
        let max_x = frame.right() as f32;

        let mut token_idx = 0;
        let mut visual_col = 0;

        for (col, ch) in text.chars().enumerate() {
            if ch == '\t' {
                visual_col += TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
                continue;
            }
            let cell = visual_col;
            visual_col += 1;

            if cell < left_column {
                continue;
            }
            let pen_x = x as f32 + (cell - left_column) as f32 * self.char_width;
            if pen_x >= max_x {
                break;
            }

            // Advance past tokens that end at or before this column
            while token_idx < tokens.len() && tokens[token_idx].end_col <= col {
                token_idx += 1;
            }

            let color = match tokens.get(token_idx) {
                Some(token) if col >= token.start_col => syntax_theme
                    .color_for_highlight(token.highlight)
                    .to_argb_u32(),
                _ => default_color,
            };

            if !ch.is_whitespace() {
                self.draw_glyph(frame, pen_x, baseline, ch, color);
            }
        }
    }

    fn draw_glyph(&mut self, frame: &mut Frame, pen_x: f32, baseline: f32, ch: char, color: u32) {
        let key = (ch, self.font_size.to_bits());
        let font = self.font;
        let font_size = self.font_size;
        let (metrics, bitmap) = self
            .glyph_cache
            .entry(key)
            .or_insert_with(|| font.rasterize(ch, font_size));

        let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

        for bitmap_y in 0..metrics.height {
            for bitmap_x in 0..metrics.width {
                let Some(&alpha) = bitmap.get(bitmap_y * metrics.width + bitmap_x) else {
                    continue;
                };
                if alpha == 0 {
                    continue;
                }
                let px = pen_x as isize + bitmap_x as isize + metrics.xmin as isize;
                let py = (glyph_top + bitmap_y as f32) as isize;
                if px >= 0 && py >= 0 {
                    frame.blend_coverage(px as usize, py as usize, color, alpha);
                }
            }
        }
    }
}
