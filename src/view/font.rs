//! Font loading and glyph caching
//!
//! The font comes from the configured path when set, otherwise from the
//! first well-known monospace system font that parses.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings, Metrics};

use super::frame::TextPainter;

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Monospace fonts tried in order when no font is configured
#[cfg(target_os = "macos")]
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/SFNSMono.ttf",
    "/System/Library/Fonts/Monaco.ttf",
];

#[cfg(target_os = "windows")]
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
];

/// Parse a font from raw bytes
pub fn font_from_bytes(bytes: &[u8]) -> Result<Font> {
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow!("Failed to parse font: {}", e))
}

/// Load a font file
pub fn load_font_file(path: &Path) -> Result<Font> {
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    font_from_bytes(&bytes).with_context(|| format!("parsing font {}", path.display()))
}

/// First system font candidate that exists on disk
pub fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Load the configured font, or search the system candidates
pub fn load_font(configured: Option<&Path>) -> Result<Font> {
    if let Some(path) = configured {
        tracing::info!("Loading configured font {}", path.display());
        return load_font_file(path);
    }

    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match load_font_file(path) {
            Ok(font) => {
                tracing::info!("Loaded system font {}", path.display());
                return Ok(font);
            }
            Err(e) => tracing::warn!("Skipping font {}: {:#}", path.display(), e),
        }
    }

    Err(anyhow!(
        "No monospace font found; set font_path in config.yaml or pass --font"
    ))
}

/// A font at one pixel size plus its rasterized glyphs
pub struct GlyphAtlas {
    font: Font,
    font_size: f32,
    ascent: f32,
    char_width: f32,
    line_height: usize,
    glyph_cache: GlyphCache,
}

impl GlyphAtlas {
    /// `font_size` is in physical pixels
    pub fn new(font: Font, font_size: f32) -> Result<Self> {
        let mut atlas = Self {
            font,
            font_size,
            ascent: 0.0,
            char_width: 0.0,
            line_height: 0,
            glyph_cache: HashMap::new(),
        };
        atlas.set_font_size(font_size)?;
        Ok(atlas)
    }

    /// Change the pixel size (e.g. on a scale factor change)
    pub fn set_font_size(&mut self, font_size: f32) -> Result<()> {
        let line_metrics = self
            .font
            .horizontal_line_metrics(font_size)
            .context("Font missing horizontal line metrics")?;
        let (metrics, _) = self.font.rasterize('M', font_size);

        self.font_size = font_size;
        self.ascent = line_metrics.ascent;
        self.line_height = line_metrics.new_line_size.ceil().max(1.0) as usize;
        self.char_width = metrics.advance_width.max(1.0);
        // Glyphs rasterized at other sizes are dropped
        self.glyph_cache.retain(|&(_, size), _| size == font_size.to_bits());
        tracing::debug!(
            "Font size {}: char width {}, line height {}",
            font_size,
            self.char_width,
            self.line_height
        );
        Ok(())
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn line_height(&self) -> usize {
        self.line_height
    }

    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.len()
    }

    pub fn painter(&mut self) -> TextPainter<'_> {
        TextPainter::new(
            &self.font,
            &mut self.glyph_cache,
            self.font_size,
            self.ascent,
            self.char_width,
            self.line_height,
        )
    }
}
