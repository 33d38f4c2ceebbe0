use crate::error::PickError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "linepick";
const CONFIG_FILE: &str = "config.json";

/// Defaults read from the user's config file. Command-line flags take
/// precedence over every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rows of the vertical list; 0 selects the horizontal ribbon
    #[serde(default)]
    pub lines: usize,

    /// Text shown before the query
    #[serde(default)]
    pub prompt: String,

    /// First character marking header lines, if headers are enabled
    #[serde(default)]
    pub header_marker: Option<char>,

    /// Prefix the printed selection with its enclosing header and a tab
    #[serde(default)]
    pub print_header: bool,
}

impl AppConfig {
    /// Load config from the user config directory, or return the default if
    /// there is none.
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`; a missing file yields the default.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        let config = serde_json::from_str(&content).map_err(|source| PickError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }
}

/// Path of the config file (`$XDG_CONFIG_HOME/linepick/config.json` on
/// Linux), if a config directory can be determined.
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("linepick_config_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("linepick_config_does_not_exist.json");
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let path = scratch_file("partial.json", r##"{ "lines": 12, "header_marker": "#" }"##);
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.lines, 12);
        assert_eq!(config.header_marker, Some('#'));
        assert!(config.prompt.is_empty());
        assert!(!config.print_header);
    }

    #[test]
    fn test_malformed_file() {
        let path = scratch_file("broken.json", "{ lines: ");
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PickError>(),
            Some(PickError::Config { .. })
        ));
    }
}
