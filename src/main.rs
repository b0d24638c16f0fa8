//! codebuffer - show a syntax-highlighted buffer in a window
//!
//! With no arguments this opens a 300x200 window with XML sample text and
//! runs until the window is closed.

mod runtime;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use codebuffer::cli::CliArgs;
use codebuffer::config::AppConfig;
use codebuffer::startup::build_model;
use codebuffer::view::load_font;

use runtime::App;

fn main() -> Result<()> {
    codebuffer::tracing::init();

    let args = CliArgs::parse();
    let config = AppConfig::load();
    let startup = args
        .source
        .resolve(&config, codebuffer::config_paths::syntax_dir());
    tracing::debug!("Startup: {:?}", startup);

    let model = build_model(&startup, config)?;
    let font = load_font(startup.font_path.as_deref())?;

    let event_loop = EventLoop::new().context("initializing event loop")?;
    let mut app = App::new(model, font);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.take_error() {
        return Err(e);
    }
    tracing::info!("Window closed, exiting");
    Ok(())
}
