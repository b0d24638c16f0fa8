//! Where codebuffer keeps its files
//!
//! ```text
//! ~/.config/codebuffer/        ($XDG_CONFIG_HOME/codebuffer, %APPDATA%\codebuffer)
//! ├── config.yaml
//! ├── themes/{id}.yaml
//! ├── syntax/{grammar}.scm
//! └── logs/codebuffer.log.YYYY-MM-DD
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "codebuffer";

/// Root of the per-user config tree, or None without a home directory
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

fn subdir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

/// User themes, checked before the built-in ones
pub fn themes_dir() -> Option<PathBuf> {
    subdir("themes")
}

/// User highlight queries; the lowest-priority syntax search path
pub fn syntax_dir() -> Option<PathBuf> {
    subdir("syntax")
}

pub fn config_file() -> Option<PathBuf> {
    subdir("config.yaml")
}

pub fn logs_dir() -> Option<PathBuf> {
    subdir("logs")
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdirs_share_root() {
        let Some(root) = config_dir() else {
            return;
        };
        assert_eq!(logs_dir(), Some(root.join("logs")));
        assert!(syntax_dir().is_some_and(|dir| dir.starts_with(&root)));
    }
}
