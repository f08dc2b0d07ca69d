//! Configuration file.
//!
//! The file is TOML. Every section is optional; anything missing falls back
//! to the built-in values:
//!
//! ```toml
//! [[heuristics.start]]
//! map = "sp_a1_intro1"
//! spawn = [-8674.0, 1773.0, 28.0]
//! tolerance = 0.01
//! tick_offset = 1
//!
//! [[heuristics.end]]
//! map = "sp_a4_finale4"
//! center = [54.1, 159.2]
//! radius = 50.0
//! z_below = -201.4
//! tick_offset = -852
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::timing::Heuristics;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_FILE_NAME: &str = "p2timer.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub heuristics: Heuristics,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&content)?;
        debug!(
            "Loaded config from {:?}: {} start, {} end triggers",
            path.as_ref(),
            config.heuristics.start.len(),
            config.heuristics.end.len()
        );
        Ok(config)
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigParseError(e.to_string()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::heuristics::defaults;
    use tempfile::tempdir;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [[heuristics.end]]
            map = "sp_a2_intro"
            center = [0.0, 0.0]
            radius = 10.0
            z_below = 0.0
            tick_offset = -5
            "#,
        )
        .unwrap();

        assert_eq!(config.heuristics.end.len(), 1);
        assert_eq!(config.heuristics.end[0].map, "sp_a2_intro");
        assert_eq!(config.heuristics.end[0].tick_offset, -5);
        assert_eq!(config.heuristics.start, Heuristics::default().start);
    }

    #[test]
    fn test_empty_list_disables_triggers() {
        let config = Config::parse("[heuristics]\nstart = []\nend = []\n").unwrap();
        assert!(config.heuristics.start.is_empty());
        assert!(config.heuristics.end.is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[[heuristics.start]]\nmap = 3\n"),
            Err(Error::ConfigParseError(_))
        ));
        assert!(matches!(
            Config::parse("not toml at all ["),
            Err(Error::ConfigParseError(_))
        ));
    }

    #[test]
    fn test_toml_string_parses_back() {
        let text = Config::default().to_toml_string().unwrap();
        assert!(text.contains("sp_a1_intro1"));
        assert!(text.contains("tick_offset = -852"));

        let config = Config::parse(&text).unwrap();
        assert_eq!(config.heuristics.start[0].spawn, defaults::INTRO_SPAWN);
        assert_eq!(config.heuristics.end[0].radius, defaults::FINALE_RADIUS);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);

        let mut config = Config::default();
        config.heuristics.start[0].tick_offset = 3;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }
}
