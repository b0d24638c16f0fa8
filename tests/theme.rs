//! Theme loading tests

use std::collections::HashMap;

use codebuffer::syntax::highlight_id_for_name;
use codebuffer::theme::{self, Color, SyntaxTheme, Theme, BUILTIN_THEMES};

#[test]
fn test_all_builtin_themes_parse() {
    for builtin in BUILTIN_THEMES {
        let theme = Theme::from_builtin(builtin.id);
        assert!(theme.is_ok(), "{}: {:?}", builtin.id, theme.err());
    }
}

#[test]
fn test_default_theme_is_dark() {
    let theme = Theme::default();
    assert_eq!(theme.name, "Default Dark");
    assert_eq!(theme.editor.background.to_argb_u32(), 0xFF1E1E1E);
    assert_eq!(theme.syntax.default_color(), theme.editor.foreground);
}

#[test]
fn test_light_theme_colors() {
    let theme = Theme::from_builtin("default-light").unwrap();
    assert_eq!(theme.editor.background, Color::rgb(0xFF, 0xFF, 0xFF));
    assert_eq!(theme.scrollbar.thumb, Color::rgba(0x64, 0x64, 0x64, 0x66));

    let comment = highlight_id_for_name("comment").unwrap();
    assert_eq!(
        theme.syntax.color_for_highlight(comment),
        Color::rgb(0x00, 0x80, 0x00)
    );
}

#[test]
fn test_unknown_builtin_is_error() {
    let err = Theme::from_builtin("solarized-neon").unwrap_err();
    assert!(err.contains("solarized-neon"));
}

#[test]
fn test_scrollbar_colors_fall_back_to_editor() {
    let yaml = r##"
version: 1
name: "Minimal"
ui:
  editor:
    background: "#000000"
    foreground: "#AABBCC"
    current_line_background: "#111111"
    cursor_color: "#FFFFFF"
"##;
    let theme = Theme::from_yaml(yaml).unwrap();
    assert_eq!(theme.scrollbar.track, Color::rgb(0x11, 0x11, 0x11));
    assert_eq!(theme.scrollbar.thumb, Color::rgba(0xAA, 0xBB, 0xCC, 0x60));

    // No syntax section: everything draws in the foreground color
    let tag = highlight_id_for_name("tag").unwrap();
    assert_eq!(theme.syntax.color_for_highlight(tag), theme.editor.foreground);
}

#[test]
fn test_bad_color_in_theme_is_error() {
    let yaml = r##"
version: 1
name: "Broken"
ui:
  editor:
    background: "not-a-color"
    foreground: "#AABBCC"
    current_line_background: "#111111"
    cursor_color: "#FFFFFF"
"##;
    assert!(Theme::from_yaml(yaml).is_err());
}

#[test]
fn test_theme_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(
        &path,
        theme::DEFAULT_LIGHT_YAML.replace("Default Light", "Custom"),
    )
    .unwrap();

    let theme = theme::from_file(&path).unwrap();
    assert_eq!(theme.name, "Custom");
    assert!(theme::from_file(&dir.path().join("missing.yaml")).is_err());
}

#[test]
fn test_dotted_capture_uses_most_specific_color() {
    let mut map = HashMap::new();
    map.insert("string".to_string(), Color::rgb(1, 1, 1));
    map.insert("string.special".to_string(), Color::rgb(2, 2, 2));
    let theme = SyntaxTheme::from_map(&map, Color::rgb(0, 0, 0));

    let string = highlight_id_for_name("string").unwrap();
    let special = highlight_id_for_name("string.special").unwrap();
    assert_eq!(theme.color_for_highlight(string), Color::rgb(1, 1, 1));
    assert_eq!(theme.color_for_highlight(special), Color::rgb(2, 2, 2));
}
