//! Grammar loading
//!
//! A [`SyntaxLoader`] resolves a grammar name to a compiled tree-sitter
//! language plus highlight query. A query file found on one of the loader's
//! syntax paths (`<dir>/<grammar>.scm`) replaces the query bundled with the
//! grammar crate.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tree_sitter::{Language, Query};

use super::languages::LanguageId;

// Queries bundled with the grammar crates
const XML_HIGHLIGHTS: &str = tree_sitter_xml::XML_HIGHLIGHT_QUERY;
const RUST_HIGHLIGHTS: &str = tree_sitter_rust::HIGHLIGHTS_QUERY;
const PYTHON_HIGHLIGHTS: &str = tree_sitter_python::HIGHLIGHTS_QUERY;

/// Compiled-in grammar and its bundled highlight query
fn builtin(lang: LanguageId) -> Option<(Language, &'static str)> {
    match lang {
        LanguageId::Xml => Some((tree_sitter_xml::LANGUAGE_XML.into(), XML_HIGHLIGHTS)),
        LanguageId::Rust => Some((tree_sitter_rust::LANGUAGE.into(), RUST_HIGHLIGHTS)),
        LanguageId::Python => Some((tree_sitter_python::LANGUAGE.into(), PYTHON_HIGHLIGHTS)),
        LanguageId::PlainText => None,
    }
}

/// Errors raised while loading a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// No grammar is registered under this name
    UnknownLanguage(String),
    /// The name resolves to plain text, which has no rules to load
    NoHighlighting(String),
    /// A query override exists but could not be read
    Io { path: PathBuf, message: String },
    /// The highlight query does not compile against the grammar
    Query { language: LanguageId, message: String },
    /// The grammar is incompatible with the linked tree-sitter runtime
    Language { language: LanguageId, message: String },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnknownLanguage(name) => write!(f, "unknown syntax '{}'", name),
            SyntaxError::NoHighlighting(name) => {
                write!(f, "syntax '{}' has no highlighting rules", name)
            }
            SyntaxError::Io { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
            SyntaxError::Query { language, message } => write!(
                f,
                "invalid highlight query for {}: {}",
                language.display_name(),
                message
            ),
            SyntaxError::Language { language, message } => write!(
                f,
                "cannot use {} grammar: {}",
                language.display_name(),
                message
            ),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Where a grammar's highlight query came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarSource {
    Builtin,
    File(PathBuf),
}

/// Loaded highlighting rules for one language.
///
/// Cloning is cheap; the compiled query is shared.
#[derive(Clone)]
pub struct Grammar {
    id: LanguageId,
    language: Language,
    query: Arc<Query>,
    source: GrammarSource,
}

impl Grammar {
    /// Load a compiled-in grammar with its bundled query
    pub fn builtin(id: LanguageId) -> Result<Self, SyntaxError> {
        let (language, query_src) =
            builtin(id).ok_or_else(|| SyntaxError::NoHighlighting(id.name().to_string()))?;
        Self::compile(id, language, query_src, GrammarSource::Builtin)
    }

    fn compile(
        id: LanguageId,
        language: Language,
        query_src: &str,
        source: GrammarSource,
    ) -> Result<Self, SyntaxError> {
        let query = Query::new(&language, query_src).map_err(|e| SyntaxError::Query {
            language: id,
            message: e.to_string(),
        })?;

        Ok(Self {
            id,
            language,
            query: Arc::new(query),
            source,
        })
    }

    pub fn language_id(&self) -> LanguageId {
        self.id
    }

    /// Canonical grammar name ("xml")
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn display_name(&self) -> &'static str {
        self.id.display_name()
    }

    pub fn source(&self) -> &GrammarSource {
        &self.source
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Number of distinct capture names in the highlight query
    pub fn capture_count(&self) -> usize {
        self.query.capture_names().len()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("captures", &self.capture_count())
            .finish()
    }
}

/// Resolves grammar names to [`Grammar`]s, honouring query overrides
#[derive(Debug, Clone, Default)]
pub struct SyntaxLoader {
    /// Searched front to back; most recently added first
    search_paths: Vec<PathBuf>,
}

impl SyntaxLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader, adding each path in order (the last one wins)
    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut loader = Self::new();
        for path in paths {
            loader.add_syntax_path(path);
        }
        loader
    }

    /// Add a directory searched for `<grammar>.scm` query overrides.
    /// Directories added later take priority over earlier ones.
    pub fn add_syntax_path(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        tracing::debug!("Adding syntax path {}", dir.display());
        self.search_paths.retain(|p| p != &dir);
        self.search_paths.insert(0, dir);
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Load the grammar registered under `name`
    pub fn load(&self, name: &str) -> Result<Grammar, SyntaxError> {
        let id = LanguageId::from_name(name)
            .ok_or_else(|| SyntaxError::UnknownLanguage(name.to_string()))?;
        let (language, bundled) =
            builtin(id).ok_or_else(|| SyntaxError::NoHighlighting(name.to_string()))?;

        match self.find_override(id) {
            Some(path) => {
                let query_src =
                    std::fs::read_to_string(&path).map_err(|e| SyntaxError::Io {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                tracing::info!(
                    "Loading {} highlight query from {}",
                    id.display_name(),
                    path.display()
                );
                Grammar::compile(id, language, &query_src, GrammarSource::File(path))
            }
            None => {
                tracing::debug!("Loading builtin {} grammar", id.display_name());
                Grammar::compile(id, language, bundled, GrammarSource::Builtin)
            }
        }
    }

    fn find_override(&self, id: LanguageId) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|dir| query_file(dir, id))
            .find(|path| path.is_file())
    }
}

fn query_file(dir: &Path, id: LanguageId) -> PathBuf {
    dir.join(format!("{}.scm", id.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_builtin_xml() {
        let grammar = SyntaxLoader::new().load("xml").unwrap();
        assert_eq!(grammar.language_id(), LanguageId::Xml);
        assert_eq!(grammar.source(), &GrammarSource::Builtin);
        assert!(grammar.capture_count() > 0);
    }

    #[test]
    fn test_all_bundled_queries_compile() {
        for lang in LanguageId::ALL.iter().filter(|l| l.has_highlighting()) {
            let grammar = Grammar::builtin(*lang);
            assert!(grammar.is_ok(), "{:?}: {:?}", lang, grammar.err());
        }
    }

    #[test]
    fn test_unknown_language() {
        let err = SyntaxLoader::new().load("klingon").unwrap_err();
        assert_eq!(err, SyntaxError::UnknownLanguage("klingon".to_string()));
        assert_eq!(err.to_string(), "unknown syntax 'klingon'");
    }

    #[test]
    fn test_plain_text_has_no_rules() {
        let err = SyntaxLoader::new().load("text").unwrap_err();
        assert!(matches!(err, SyntaxError::NoHighlighting(_)));
        assert!(Grammar::builtin(LanguageId::PlainText).is_err());
    }

    #[test]
    fn test_override_query_from_syntax_path() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("xml.scm"), "(Comment) @comment\n").unwrap();

        let mut loader = SyntaxLoader::new();
        loader.add_syntax_path(dir.path());
        let grammar = loader.load("xml").unwrap();

        assert_eq!(
            grammar.source(),
            &GrammarSource::File(dir.path().join("xml.scm"))
        );
        assert_eq!(grammar.capture_count(), 1);
    }

    #[test]
    fn test_override_uses_canonical_name() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("python.scm"), "(comment) @comment\n").unwrap();

        let loader = SyntaxLoader::with_paths([dir.path()]);
        let grammar = loader.load("py").unwrap();
        assert!(matches!(grammar.source(), GrammarSource::File(_)));
    }

    #[test]
    fn test_invalid_override_query() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("xml.scm"), "(NoSuchNode) @tag\n").unwrap();

        let loader = SyntaxLoader::with_paths([dir.path()]);
        let err = loader.load("xml").unwrap_err();
        assert!(
            matches!(
                err,
                SyntaxError::Query {
                    language: LanguageId::Xml,
                    ..
                }
            ),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_latest_syntax_path_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        std::fs::write(first.path().join("xml.scm"), "(Comment) @comment\n").unwrap();
        std::fs::write(
            second.path().join("xml.scm"),
            "(Comment) @comment\n(AttValue) @string\n",
        )
        .unwrap();

        let loader = SyntaxLoader::with_paths([first.path(), second.path()]);
        assert_eq!(loader.search_paths()[0], second.path());

        let grammar = loader.load("xml").unwrap();
        assert_eq!(grammar.capture_count(), 2);
    }

    #[test]
    fn test_re_adding_path_moves_it_to_front() {
        let mut loader = SyntaxLoader::new();
        loader.add_syntax_path("/a");
        loader.add_syntax_path("/b");
        loader.add_syntax_path("/a");
        assert_eq!(
            loader.search_paths(),
            &[PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }
}
