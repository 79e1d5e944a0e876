//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chatdeck_sidebar::DEFAULT_COMPACT_MAX_WIDTH;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Window widths at or below this count as compact
    pub compact_max_width: u32,
    /// Window width before the host reports a real one
    pub initial_width: u32,
    /// Open a blank conversation instead of the mask picker on "add new".
    /// A value saved in the settings table takes precedence.
    pub dont_show_mask_splash_screen: bool,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("chatdeck.db"),
            compact_max_width: DEFAULT_COMPACT_MAX_WIDTH,
            initial_width: 1280,
            dont_show_mask_splash_screen: false,
        }
    }

    /// Per-user data directory, falling back to `.chatdeck` in the working directory
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("ChatDeck"))
            .unwrap_or_else(|| PathBuf::from(".chatdeck"))
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;

        if config.compact_max_width == 0 {
            return Err(CoreError::Config(
                "compact_max_width must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/data"));
        assert_eq!(config.database_path, PathBuf::from("/data/chatdeck.db"));
        assert_eq!(config.compact_max_width, 600);
        assert!(!config.dont_show_mask_splash_screen);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "dont_show_mask_splash_screen": true }"#).unwrap();
        assert!(config.dont_show_mask_splash_screen);
        assert_eq!(config.compact_max_width, DEFAULT_COMPACT_MAX_WIDTH);
    }

    #[test]
    fn test_default_database_lives_in_data_dir() {
        let dir = Config::data_dir();
        assert!(dir.ends_with("ChatDeck") || dir.ends_with(".chatdeck"));
        assert_eq!(Config::default().database_path, dir.join("chatdeck.db"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = PathBuf::from("/definitely/not/here/chatdeck.json");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config, Config::default());
    }
}
