//! Assemble the window model from startup settings
//!
//! Mirrors the demo sequence: load the grammar, create the buffer, build the
//! window → scrolled window → text view tree, then set the initial text.

use anyhow::{Context, Result};

use crate::cli::StartupConfig;
use crate::config::AppConfig;
use crate::model::{AppModel, CodeBuffer};
use crate::sample::SAMPLE_XML;
use crate::syntax::{Grammar, SyntaxError, SyntaxLoader};
use crate::theme::{self, Theme};

/// Resolve the grammar; plain text yields `None`
pub fn load_grammar(startup: &StartupConfig) -> Result<Option<Grammar>, SyntaxError> {
    let loader = SyntaxLoader::with_paths(&startup.syntax_paths);
    match loader.load(&startup.language) {
        Ok(grammar) => Ok(Some(grammar)),
        Err(SyntaxError::NoHighlighting(name)) => {
            tracing::info!("Grammar '{}' has no highlighting, showing plain text", name);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load the theme by id, falling back to the default with a warning
pub fn load_theme(id: &str) -> Theme {
    match theme::load_theme(id) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("Failed to load theme '{}': {}, using default", id, e);
            Theme::default()
        }
    }
}

/// Initial text: the file's contents, or the sample
pub fn initial_text(startup: &StartupConfig) -> Result<String> {
    match &startup.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => Ok(SAMPLE_XML.to_string()),
    }
}

/// Build the complete model
pub fn build_model(startup: &StartupConfig, config: AppConfig) -> Result<AppModel> {
    let grammar = load_grammar(startup)
        .with_context(|| format!("loading grammar '{}'", startup.language))?;
    let text = initial_text(startup)?;
    let theme = load_theme(&startup.theme);

    let buffer = CodeBuffer::new(grammar);
    let mut model = AppModel::new(buffer, theme, config);
    model.title = startup.title(model.buffer().language());

    let view = model.text_view_mut();
    view.set_editable(!startup.read_only);
    view.set_text(&text);
    model.scrolled.clamp_scroll();

    tracing::info!(
        "Model ready: {} ({} lines, {} highlight tokens)",
        model.title,
        model.buffer().line_count(),
        model.buffer().highlights().token_count()
    );
    Ok(model)
}
