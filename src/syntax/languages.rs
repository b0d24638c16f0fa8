//! Language identification and detection
//!
//! Maps grammar names and file extensions to language IDs.

use std::path::Path;

/// Grammars compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Xml,
    Rust,
    Python,
}

impl LanguageId {
    /// All languages, plain text first
    pub const ALL: &'static [LanguageId] = &[
        LanguageId::PlainText,
        LanguageId::Xml,
        LanguageId::Rust,
        LanguageId::Python,
    ];

    /// Resolve a grammar name as passed to the syntax loader ("xml", "py", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "plain" | "plaintext" => Some(LanguageId::PlainText),
            "xml" => Some(LanguageId::Xml),
            "rust" | "rs" => Some(LanguageId::Rust),
            "python" | "py" => Some(LanguageId::Python),
            _ => None,
        }
    }

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "xml" | "svg" | "xsd" | "xsl" | "xslt" | "rss" | "plist" => LanguageId::Xml,
            "rs" => LanguageId::Rust,
            "py" | "pyw" => LanguageId::Python,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Canonical grammar name, also the stem of syntax-path override files
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "text",
            LanguageId::Xml => "xml",
            LanguageId::Rust => "rust",
            LanguageId::Python => "python",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Xml => "XML",
            LanguageId::Rust => "Rust",
            LanguageId::Python => "Python",
        }
    }

    /// Check if this language has syntax highlighting support
    pub fn has_highlighting(&self) -> bool {
        !matches!(self, LanguageId::PlainText)
    }
}
