//! Command-line argument parsing
//!
//! With no arguments the window shows the built-in XML sample. Flags
//! override the values from `config.yaml`.

use std::path::{Path, PathBuf};

use clap::{Args, Parser};

use crate::config::AppConfig;
use crate::syntax::LanguageId;

/// Options shared by the window and the screenshot tool
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// File to display instead of the built-in sample
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Grammar name (xml, rust, python, text); detected from FILE when omitted
    #[arg(short, long, value_name = "NAME")]
    pub lang: Option<String>,

    /// Directory searched for `<grammar>.scm` highlight queries (repeatable)
    #[arg(long = "syntax-path", value_name = "DIR")]
    pub syntax_path: Vec<PathBuf>,

    /// Theme id (default-dark, default-light, or a user theme)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Monospace font file
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Disable editing
    #[arg(long)]
    pub read_only: bool,
}

/// Syntax-highlighted code buffer in a window
#[derive(Parser, Debug)]
#[command(name = "codebuffer", version, about = "Syntax-highlighted code buffer in a window")]
pub struct CliArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Grammar used when neither `--lang` nor FILE says otherwise
pub const DEFAULT_LANGUAGE: &str = "xml";

/// Settings resolved from CLI arguments and the config file
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// File to load; `None` shows the sample
    pub file: Option<PathBuf>,
    /// Grammar name passed to the syntax loader
    pub language: String,
    /// Syntax paths in the order they are added to the loader (last wins)
    pub syntax_paths: Vec<PathBuf>,
    pub theme: String,
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub read_only: bool,
}

impl SourceArgs {
    /// Combine with the config. `user_syntax_dir` is added first so config
    /// and CLI directories take priority over it.
    pub fn resolve(self, config: &AppConfig, user_syntax_dir: Option<PathBuf>) -> StartupConfig {
        let language = match (&self.lang, &self.file) {
            (Some(lang), _) => lang.clone(),
            (None, Some(file)) => detect_language(file).to_string(),
            (None, None) => DEFAULT_LANGUAGE.to_string(),
        };

        let syntax_paths = user_syntax_dir
            .into_iter()
            .chain(config.syntax_paths.iter().cloned())
            .chain(self.syntax_path)
            .collect();

        StartupConfig {
            file: self.file,
            language,
            syntax_paths,
            theme: self.theme.unwrap_or_else(|| config.theme.clone()),
            font_path: self.font.or_else(|| config.font_path.clone()),
            font_size: config.font_size,
            read_only: self.read_only,
        }
    }
}

fn detect_language(path: &Path) -> &'static str {
    LanguageId::from_path(path).name()
}

impl StartupConfig {
    /// Window title: file name (or "sample") and grammar
    pub fn title(&self, language: LanguageId) -> String {
        let source = self
            .file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".to_string());
        format!("{} — {}", source, language.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_is_xml_sample() {
        let startup = SourceArgs::default().resolve(&AppConfig::default(), None);
        assert_eq!(startup.file, None);
        assert_eq!(startup.language, "xml");
        assert_eq!(startup.theme, "default-dark");
        assert!(!startup.read_only);
        assert!(startup.syntax_paths.is_empty());
    }

    #[test]
    fn test_language_detected_from_file() {
        let args = SourceArgs {
            file: Some(PathBuf::from("src/lib.rs")),
            ..Default::default()
        };
        assert_eq!(args.resolve(&AppConfig::default(), None).language, "rust");

        let args = SourceArgs {
            file: Some(PathBuf::from("notes.txt")),
            ..Default::default()
        };
        assert_eq!(args.resolve(&AppConfig::default(), None).language, "text");
    }

    #[test]
    fn test_explicit_lang_wins_over_extension() {
        let args = SourceArgs {
            file: Some(PathBuf::from("data.rs")),
            lang: Some("xml".to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve(&AppConfig::default(), None).language, "xml");
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = AppConfig {
            theme: "default-light".to_string(),
            font_path: Some(PathBuf::from("/config/font.ttf")),
            syntax_paths: vec![PathBuf::from("/config/syntax")],
            ..Default::default()
        };
        let args = SourceArgs {
            theme: Some("mine".to_string()),
            font: Some(PathBuf::from("/cli/font.ttf")),
            syntax_path: vec![PathBuf::from("/cli/syntax")],
            ..Default::default()
        };
        let startup = args.resolve(&config, Some(PathBuf::from("/user/syntax")));
        assert_eq!(startup.theme, "mine");
        assert_eq!(startup.font_path, Some(PathBuf::from("/cli/font.ttf")));
        assert_eq!(
            startup.syntax_paths,
            vec![
                PathBuf::from("/user/syntax"),
                PathBuf::from("/config/syntax"),
                PathBuf::from("/cli/syntax"),
            ]
        );
    }

    #[test]
    fn test_title() {
        let startup = SourceArgs::default().resolve(&AppConfig::default(), None);
        assert_eq!(startup.title(LanguageId::Xml), "sample — XML");
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "codebuffer",
            "doc.xml",
            "--syntax-path",
            "a",
            "--syntax-path",
            "b",
            "--read-only",
        ]);
        assert_eq!(args.source.file, Some(PathBuf::from("doc.xml")));
        assert_eq!(args.source.syntax_path.len(), 2);
        assert!(args.source.read_only);
    }
}
