//! Application configuration
//!
//! Stored in `~/.config/codebuffer/config.yaml`. Every field is optional in
//! the file; missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// User preferences read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Theme id (e.g. "default-dark", "default-light", or a user theme)
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Monospace font file; system fonts are searched when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Font size in logical pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Extra directories searched for `<grammar>.scm` query overrides
    #[serde(default)]
    pub syntax_paths: Vec<PathBuf>,
    /// Initial window width in logical pixels
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Initial window height in logical pixels
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_font_size() -> f32 {
    14.0
}

fn default_window_width() -> u32 {
    300
}

fn default_window_height() -> u32 {
    200
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            font_path: None,
            font_size: default_font_size(),
            syntax_paths: Vec::new(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Parse config from YAML; an empty document yields defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(format!("font_size must be positive, got {}", self.font_size));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err("window size must be non-zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_window() {
        let config = AppConfig::default();
        assert_eq!((config.window_width, config.window_height), (300, 200));
        assert_eq!(config.theme, "default-dark");
        assert!(config.syntax_paths.is_empty());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = AppConfig::from_yaml("theme: default-light\nfont_size: 18\n").unwrap();
        assert_eq!(config.theme, "default-light");
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.window_width, 300);
        assert_eq!(config.font_path, None);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_font_size_rejected() {
        assert!(AppConfig::from_yaml("font_size: 0").is_err());
        assert!(AppConfig::from_yaml("font_size: -3.5").is_err());
    }

    #[test]
    fn test_syntax_paths_list() {
        let config = AppConfig::from_yaml("syntax_paths:\n  - /opt/syntax\n  - rel/dir\n").unwrap();
        assert_eq!(
            config.syntax_paths,
            vec![PathBuf::from("/opt/syntax"), PathBuf::from("rel/dir")]
        );
    }
}
