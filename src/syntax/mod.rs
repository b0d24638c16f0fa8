//! Syntax highlighting module
//!
//! Provides tree-sitter based syntax highlighting with:
//! - Grammar lookup by name, with query overrides from syntax paths
//! - Incremental reparsing per buffer
//! - Per-line highlight tokens for rendering
//!
//! ## Flow
//!
//! ```text
//! SyntaxLoader::load("xml") → Grammar → CodeBuffer
//!   buffer edit → Highlighter::highlight → SyntaxHighlights → paint
//! ```

mod highlights;
mod languages;
mod loader;
mod parser;

pub use highlights::{
    capture_name_chain, highlight_id_for_name, highlight_name, HighlightId, HighlightToken,
    LineHighlights, SyntaxHighlights, HIGHLIGHT_NAMES,
};
pub use languages::LanguageId;
pub use loader::{Grammar, GrammarSource, SyntaxError, SyntaxLoader};
pub use parser::Highlighter;
