//! CLI command implementations.

pub mod config;
pub mod dump;
pub mod info;
pub mod time;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use p2timer_core::config::DEFAULT_FILE_NAME;
use p2timer_core::{CommandObserver, Config, DemoFile, Header};
use tracing::info;

/// Load the config named on the command line, or `p2timer.toml` in the
/// working directory if present, or the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!("Using config {}", path.display());
            Ok(config)
        }
        None => Config::load_or_default(DEFAULT_FILE_NAME)
            .with_context(|| format!("Failed to load config from {}", DEFAULT_FILE_NAME)),
    }
}

/// Read and decode a demo. Decode errors carry the path and, when the
/// header is readable, the map name.
pub fn decode_demo(
    path: &Path,
    config: &Config,
    observer: Option<&mut dyn CommandObserver>,
) -> Result<DemoFile> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    DemoFile::parse(&data, &config.heuristics, observer).with_context(|| {
        match Header::from_bytes(&data) {
            Ok(header) => format!(
                "Failed to decode {} (map '{}')",
                path.display(),
                header.map_name_text()
            ),
            Err(_) => format!("Failed to decode {}", path.display()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use p2timer_core::Position;
    use p2timer_core::demo::MockDemoBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_decode_error_names_the_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.dem");
        let bytes = MockDemoBuilder::new("sp_a3_speed_ramp")
            .packet(1, Position::default())
            .raw(&[0x63])
            .build();
        fs::write(&path, bytes).unwrap();

        let err = decode_demo(&path, &Config::default(), None).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("broken.dem"), "{}", message);
        assert!(message.contains("map 'sp_a3_speed_ramp'"), "{}", message);
        assert!(message.contains("Unknown command tag 99"), "{}", message);
    }

    #[test]
    fn test_decode_error_without_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"not a demo").unwrap();

        let err = decode_demo(&path, &Config::default(), None).unwrap_err();
        let message = format!("{:#}", err);
        assert!(!message.contains("map '"), "{}", message);
        assert!(message.contains("bad magic"), "{}", message);
    }

    #[test]
    fn test_decode_demo_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.dem");
        let bytes = MockDemoBuilder::new("sp_a2_intro")
            .packets(&[0, 60], Position::default())
            .stop()
            .build();
        fs::write(&path, bytes).unwrap();

        let demo = decode_demo(&path, &Config::default(), None).unwrap();
        assert_eq!(demo.elapsed_ticks(), 60);
    }
}
