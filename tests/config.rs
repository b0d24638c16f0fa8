//! Config file loading tests

use std::path::PathBuf;

use codebuffer::config::AppConfig;
use codebuffer::config_paths;

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "theme: default-light\nfont_path: /fonts/mono.ttf\nwindow_width: 640\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.theme, "default-light");
    assert_eq!(config.font_path, Some(PathBuf::from("/fonts/mono.ttf")));
    assert_eq!(config.window_width, 640);
    assert_eq!(config.window_height, 200);
}

#[test]
fn test_invalid_yaml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "window_width: [not, a, number]\n").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(err.contains("config.yaml"), "{}", err);
}

#[test]
fn test_zero_window_size_rejected() {
    assert!(AppConfig::from_yaml("window_height: 0\n").is_err());
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AppConfig::load_from(&dir.path().join("nope.yaml")).is_err());
}

#[test]
fn test_config_round_trips_through_yaml() {
    let config = AppConfig {
        theme: "mine".to_string(),
        font_size: 11.5,
        syntax_paths: vec![PathBuf::from("/srv/queries")],
        ..AppConfig::default()
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(AppConfig::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_paths_live_under_app_dir() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.ends_with("codebuffer"));
        assert_eq!(config_paths::config_file(), Some(dir.join("config.yaml")));
        assert_eq!(config_paths::themes_dir(), Some(dir.join("themes")));
        assert_eq!(config_paths::syntax_dir(), Some(dir.join("syntax")));
    }
}
