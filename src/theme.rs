//! Color themes
//!
//! Themes are YAML files. Two are compiled in (`default-dark`,
//! `default-light`); a file named `{id}.yaml` in
//! `~/.config/codebuffer/themes/` takes precedence over a built-in with
//! the same id.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::syntax::{capture_name_chain, HighlightId, HIGHLIGHT_NAMES};

pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// A theme compiled into the binary
pub struct BuiltinTheme {
    /// Id used by `theme:` in config.yaml and `--theme`
    pub id: &'static str,
    pub yaml: &'static str,
}

pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
];

pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
        .map_err(|e| format!("Invalid theme {}: {}", path.display(), e))
}

/// Resolve a theme id, preferring the user's themes directory
pub fn load_theme(id: &str) -> Result<Theme, String> {
    let user_file = crate::config_paths::themes_dir()
        .map(|dir| dir.join(format!("{}.yaml", id)))
        .filter(|path| path.is_file());

    match user_file {
        Some(path) => {
            tracing::info!("Using theme '{}' from {}", id, path.display());
            from_file(&path)
        }
        None => {
            tracing::debug!("Using built-in theme '{}'", id);
            Theme::from_builtin(id)
        }
    }
}

/// RGBA color, written in theme files as `#RRGGBB` or `#RRGGBBAA`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Pack as `0xAARRGGBB`, the softbuffer pixel layout
    pub fn to_argb_u32(&self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || format!("Invalid color format: {}", s);
        if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
            return Err(invalid());
        }
        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid()))
            .collect::<Result<Vec<u8>, String>>()?;
        Ok(match bytes[..] {
            [r, g, b] => Color::rgb(r, g, b),
            [r, g, b, a] => Color::rgba(r, g, b, a),
            _ => return Err(invalid()),
        })
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

/// Theme file contents
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
    /// Capture name (e.g. "comment", "string.special") to color
    #[serde(default)]
    pub syntax: HashMap<String, Color>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub editor: EditorTheme,
    #[serde(default)]
    pub scrollbar: ScrollbarThemeData,
}

/// Scrollbar colors as written; missing ones derive from the editor colors
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrollbarThemeData {
    #[serde(default)]
    pub track: Option<Color>,
    #[serde(default)]
    pub thumb: Option<Color>,
}

/// Resolved theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    pub scrollbar: ScrollbarTheme,
    pub syntax: SyntaxTheme,
}

/// Text view colors
#[derive(Debug, Clone, Deserialize)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub current_line_background: Color,
    pub cursor_color: Color,
}

#[derive(Debug, Clone)]
pub struct ScrollbarTheme {
    pub track: Color,
    pub thumb: Color,
}

/// Highlight colors indexed by `HighlightId`
///
/// Names missing from the theme inherit from their dotted parent
/// (`string.special` → `string`), then fall back to the editor foreground.
#[derive(Debug, Clone)]
pub struct SyntaxTheme {
    colors: Vec<Color>,
    default: Color,
}

impl SyntaxTheme {
    /// Resolve a capture-name → color map against `HIGHLIGHT_NAMES`
    pub fn from_map(map: &HashMap<String, Color>, default: Color) -> Self {
        let colors = HIGHLIGHT_NAMES
            .iter()
            .map(|name| {
                capture_name_chain(name)
                    .find_map(|candidate| map.get(candidate).copied())
                    .unwrap_or(default)
            })
            .collect();
        Self { colors, default }
    }

    /// Color for a highlight id; unknown ids use the default
    #[inline]
    pub fn color_for_highlight(&self, id: HighlightId) -> Color {
        self.colors
            .get(id as usize)
            .copied()
            .unwrap_or(self.default)
    }

    /// Color for unhighlighted text
    pub fn default_color(&self) -> Color {
        self.default
    }
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Ok(Self::from_data(data))
    }

    /// Look up one of `BUILTIN_THEMES` by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))
            .and_then(|entry| Theme::from_yaml(entry.yaml))
    }

    /// Fill in derived colors and resolve the syntax map
    pub fn from_data(data: ThemeData) -> Self {
        let editor = data.ui.editor;
        let scrollbar = ScrollbarTheme {
            track: data
                .ui
                .scrollbar
                .track
                .unwrap_or(editor.current_line_background),
            thumb: data
                .ui
                .scrollbar
                .thumb
                .unwrap_or(editor.foreground.with_alpha(0x60)),
        };
        Theme {
            name: data.name,
            syntax: SyntaxTheme::from_map(&data.syntax, editor.foreground),
            editor,
            scrollbar,
        }
    }

    /// The embedded dark theme, or a hardcoded copy if its YAML is broken
    pub fn default_dark() -> Self {
        match Theme::from_yaml(DEFAULT_DARK_YAML) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!("Built-in dark theme failed to parse: {}", e);
                let foreground = Color::rgb(0xD4, 0xD4, 0xD4);
                Theme {
                    name: "Default Dark".to_string(),
                    editor: EditorTheme {
                        background: Color::rgb(0x1E, 0x1E, 0x1E),
                        foreground,
                        current_line_background: Color::rgb(0x2A, 0x2A, 0x2A),
                        cursor_color: Color::rgb(0xFF, 0xFF, 0xFF),
                    },
                    scrollbar: ScrollbarTheme {
                        track: Color::rgb(0x2A, 0x2A, 0x2A),
                        thumb: foreground.with_alpha(0x60),
                    },
                    syntax: SyntaxTheme::from_map(&HashMap::new(), foreground),
                }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::highlight_id_for_name;

    #[test]
    fn test_syntax_theme_parent_fallback() {
        let mut map = HashMap::new();
        map.insert("string".to_string(), Color::rgb(1, 2, 3));
        map.insert("punctuation.bracket".to_string(), Color::rgb(4, 5, 6));
        let fg = Color::rgb(9, 9, 9);
        let theme = SyntaxTheme::from_map(&map, fg);

        let id = |name| highlight_id_for_name(name).unwrap();
        assert_eq!(theme.color_for_highlight(id("string.special")), Color::rgb(1, 2, 3));
        assert_eq!(
            theme.color_for_highlight(id("punctuation.bracket")),
            Color::rgb(4, 5, 6)
        );
        assert_eq!(theme.color_for_highlight(id("punctuation.delimiter")), fg);
        assert_eq!(theme.color_for_highlight(id("tag")), fg);
        assert_eq!(theme.color_for_highlight(u16::MAX), fg);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }
}
