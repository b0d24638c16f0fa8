//! Headless screenshot of the code buffer window
//!
//! Builds the same model as the windowed binary and paints it to a PNG.
//!
//! Usage:
//!   cargo run --bin screenshot -- --out sample.png
//!   cargo run --bin screenshot -- src/lib.rs --width 800 --height 600 --scale 2

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use codebuffer::cli::SourceArgs;
use codebuffer::config::AppConfig;
use codebuffer::startup::build_model;
use codebuffer::view::{load_font, render_offscreen, GlyphAtlas};

#[derive(Parser, Debug)]
#[command(name = "screenshot", about = "Render the code buffer window to a PNG")]
struct Args {
    #[command(flatten)]
    source: SourceArgs,
    /// Output PNG path
    #[arg(long, default_value = "codebuffer.png")]
    out: PathBuf,
    /// Width in logical pixels (default: config window_width)
    #[arg(long)]
    width: Option<u32>,
    /// Height in logical pixels (default: config window_height)
    #[arg(long)]
    height: Option<u32>,
    /// Scale factor applied to size and font
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Put the caret on this line (0-indexed) before rendering
    #[arg(long)]
    line: Option<usize>,
}

fn save_png(buffer: &[u32], width: u32, height: u32, path: &Path) -> Result<()> {
    // Convert ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity(buffer.len() * 4);
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    let img = image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(width, height, rgba)
        .context("failed to create image buffer")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("saving PNG to {}", path.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(
        args.scale.is_finite() && args.scale > 0.0,
        "--scale must be positive"
    );

    let config = AppConfig::load();
    let startup = args
        .source
        .resolve(&config, codebuffer::config_paths::syntax_dir());

    let logical = (
        args.width.unwrap_or(config.window_width),
        args.height.unwrap_or(config.window_height),
    );
    let physical = (
        ((logical.0 as f64) * args.scale).round().max(1.0) as u32,
        ((logical.1 as f64) * args.scale).round().max(1.0) as u32,
    );

    let font = load_font(startup.font_path.as_deref())?;
    let mut atlas = GlyphAtlas::new(font, startup.font_size * args.scale as f32)?;

    let mut model = build_model(&startup, config)?;
    model.set_char_metrics(atlas.char_width(), atlas.line_height());
    model.resize(physical.0, physical.1);
    if let Some(line) = args.line {
        model.text_view_mut().set_cursor(line, 0);
    }
    model.scrolled.ensure_cursor_visible();

    let pixels = render_offscreen(&mut atlas, &model);
    save_png(&pixels, physical.0, physical.1, &args.out)?;
    eprintln!(
        "{} ({}x{}) saved {}",
        model.title,
        physical.0,
        physical.1,
        args.out.display()
    );
    Ok(())
}
