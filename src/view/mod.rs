//! View module - painting the model into a pixel buffer
//!
//! `paint` is pure drawing into a `Frame`; `Renderer` binds it to a
//! softbuffer surface for a winit window.

pub mod font;
pub mod frame;

pub use font::{find_system_font, load_font, GlyphAtlas, GlyphCache, GlyphCacheKey};
pub use frame::{blend_colors, Frame, TextPainter};

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use softbuffer::Surface;
use winit::window::Window;

use crate::model::{AppModel, SCROLLBAR_SIZE_PX, TEXT_PADDING_PX};
use crate::util::char_col_to_visual_col;

/// Caret width in pixels
const CARET_WIDTH_PX: usize = 2;

/// Paint the whole window
pub fn paint(frame: &mut Frame, atlas: &mut GlyphAtlas, model: &AppModel) {
    let theme = &model.theme;
    let viewport = model.scrolled.viewport;
    let view = model.text_view();
    let buffer = view.buffer();
    let cursor = buffer.clamp(view.cursor());
    let line_height = atlas.line_height();
    let char_width = atlas.char_width();

    frame.clear(theme.editor.background.to_argb_u32());

    let area = model.text_area();
    frame.set_clip(area);

    // Current line band
    let last_visible = viewport.top_line + viewport.visible_lines;
    if cursor.line >= viewport.top_line && cursor.line <= last_visible {
        let y = TEXT_PADDING_PX + (cursor.line - viewport.top_line) * line_height;
        frame.fill_rect_px(
            0,
            y,
            area.width as usize,
            line_height,
            theme.editor.current_line_background.to_argb_u32(),
        );
    }

    // Text; one extra line so a partially visible last line is drawn
    {
        let mut painter = atlas.painter();
        let end = (last_visible + 1).min(buffer.line_count());
        for line_idx in viewport.top_line..end {
            let y = TEXT_PADDING_PX + (line_idx - viewport.top_line) * line_height;
            let text = buffer.line(line_idx);
            painter.draw_line(
                frame,
                TEXT_PADDING_PX,
                y,
                &text,
                buffer.line_tokens(line_idx),
                viewport.left_column,
                &theme.syntax,
            );
        }
    }

    // Caret
    if view.is_editable() && cursor.line >= viewport.top_line && cursor.line <= last_visible {
        let visual = char_col_to_visual_col(&buffer.line(cursor.line), cursor.column);
        if visual >= viewport.left_column {
            let x = TEXT_PADDING_PX as f32 + (visual - viewport.left_column) as f32 * char_width;
            let y = TEXT_PADDING_PX + (cursor.line - viewport.top_line) * line_height;
            frame.fill_rect_px(
                x as usize,
                y,
                CARET_WIDTH_PX,
                line_height,
                theme.editor.cursor_color.to_argb_u32(),
            );
        }
    }

    frame.clear_clip();
    paint_scrollbars(frame, model);
}

/// Scrollbars appear only along an axis whose content does not fit
fn paint_scrollbars(frame: &mut Frame, model: &AppModel) {
    let area = model.text_area();
    let track_color = model.theme.scrollbar.track.to_argb_u32();
    let thumb_color = model.theme.scrollbar.thumb.to_argb_u32();
    let track_x = area.width as usize;
    let track_y = area.height as usize;

    let vertical = model.scrolled.vertical_thumb(area.height as usize);
    let horizontal = model.scrolled.horizontal_thumb(area.width as usize);

    if let Some(thumb) = vertical {
        frame.fill_rect_px(track_x, 0, SCROLLBAR_SIZE_PX, track_y, track_color);
        frame.blend_rect_px(
            track_x + 2,
            thumb.offset,
            SCROLLBAR_SIZE_PX - 4,
            thumb.length,
            thumb_color,
        );
    }

    if let Some(thumb) = horizontal {
        frame.fill_rect_px(0, track_y, track_x, SCROLLBAR_SIZE_PX, track_color);
        frame.blend_rect_px(
            thumb.offset,
            track_y + 2,
            thumb.length,
            SCROLLBAR_SIZE_PX - 4,
            thumb_color,
        );
    }

    if vertical.is_some() && horizontal.is_some() {
        frame.fill_rect_px(
            track_x,
            track_y,
            SCROLLBAR_SIZE_PX,
            SCROLLBAR_SIZE_PX,
            track_color,
        );
    }
}

/// Paint into a fresh ARGB buffer sized to the model's window
pub fn render_offscreen(atlas: &mut GlyphAtlas, model: &AppModel) -> Vec<u32> {
    let (width, height) = model.window_size;
    let mut pixels = vec![0u32; width as usize * height as usize];
    let mut frame = Frame::new(&mut pixels, width as usize, height as usize);
    paint(&mut frame, atlas, model);
    pixels
}

/// Softbuffer-backed renderer for one window
pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    atlas: GlyphAtlas,
    width: u32,
    height: u32,
    /// Font size in logical pixels
    base_font_size: f32,
    scale_factor: f64,
}

/// Surface dimensions; a minimized window still gets a 1x1 surface
fn surface_size(width: u32, height: u32) -> (NonZeroU32, NonZeroU32) {
    (
        NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
    )
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        font: fontdue::Font,
        base_font_size: f32,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let size = window.inner_size();

        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;
        let atlas = GlyphAtlas::new(font, base_font_size * scale_factor as f32)?;

        let mut renderer = Self {
            surface,
            atlas,
            width: 0,
            height: 0,
            base_font_size,
            scale_factor,
        };
        renderer.resize(size.width, size.height)?;
        Ok(renderer)
    }

    /// Resize the surface (physical pixels)
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (w, h) = surface_size(width, height);
        self.surface
            .resize(w, h)
            .map_err(|e| anyhow!("Failed to resize surface: {}", e))?;
        self.width = w.get();
        self.height = h.get();
        Ok(())
    }

    /// Re-rasterize for a new scale factor
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> Result<()> {
        self.scale_factor = scale_factor;
        self.atlas
            .set_font_size(self.base_font_size * scale_factor as f32)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn char_width(&self) -> f32 {
        self.atlas.char_width()
    }

    pub fn line_height(&self) -> usize {
        self.atlas.line_height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Paint the model and present it
    pub fn render(&mut self, model: &AppModel) -> Result<()> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to get surface buffer: {}", e))?;
        {
            let mut frame = Frame::new(&mut buffer, self.width as usize, self.height as usize);
            paint(&mut frame, &mut self.atlas, model);
        }
        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}
