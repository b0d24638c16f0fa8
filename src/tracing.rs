//! Logging setup and update diagnostics
//!
//! Console verbosity follows `RUST_LOG` (default `warn`), for example
//! `RUST_LOG=codebuffer::syntax=trace` or `RUST_LOG=cursor=debug`.
//!
//! A second layer always writes debug-level logs to
//! `~/.config/codebuffer/logs/codebuffer.log`, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

const LOG_FILE_PREFIX: &str = "codebuffer.log";

/// Install the console and file subscribers.
///
/// Calling it again keeps the first subscriber and prints a warning.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug")),
        ),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {}", e);
            None
        }
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
    {
        eprintln!("Warning: tracing already initialized: {}", e);
    }
}

/// Caret, scroll offset and revision captured around an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub caret: (usize, usize),
    pub scroll: (usize, usize),
    pub revision: u64,
}

impl ViewSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        let caret = model.text_view().cursor();
        let viewport = model.scrolled.viewport;
        Self {
            caret: (caret.line, caret.column),
            scroll: (viewport.top_line, viewport.left_column),
            revision: model.buffer().revision(),
        }
    }

    /// Describe what changed between `self` and `after`, if anything
    pub fn diff(&self, after: &ViewSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.caret != after.caret {
            changes.push(format!(
                "caret ({},{}) → ({},{})",
                self.caret.0, self.caret.1, after.caret.0, after.caret.1
            ));
        }
        if self.scroll != after.scroll {
            changes.push(format!(
                "scroll ({},{}) → ({},{})",
                self.scroll.0, self.scroll.1, after.scroll.0, after.scroll.1
            ));
        }
        if self.revision != after.revision {
            changes.push(format!("revision {} → {}", self.revision, after.revision));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
