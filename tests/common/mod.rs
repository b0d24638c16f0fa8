//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use codebuffer::config::AppConfig;
use codebuffer::model::{AppModel, CodeBuffer};
use codebuffer::syntax::SyntaxLoader;
use codebuffer::theme::Theme;

/// Plain-text model with the caret at (line, column) and a 25x80 viewport
pub fn test_model(text: &str, line: usize, column: usize) -> AppModel {
    let mut model = AppModel::new(
        CodeBuffer::with_text(None, text),
        Theme::default(),
        AppConfig::default(),
    );
    model.scrolled.resize(25, 80);
    model.text_view_mut().set_cursor(line, column);
    model
}

/// Same as `test_model` but highlighted as XML, caret at the start
pub fn xml_model(text: &str) -> AppModel {
    let grammar = SyntaxLoader::new()
        .load("xml")
        .expect("xml grammar is built in");
    let mut model = AppModel::new(
        CodeBuffer::with_text(Some(grammar), text),
        Theme::default(),
        AppConfig::default(),
    );
    model.scrolled.resize(25, 80);
    model
}

/// "line0\nline1\n..." with `count` lines and no trailing newline
pub fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line{}", i))
        .collect::<Vec<_>>()
        .join("\n")
}
